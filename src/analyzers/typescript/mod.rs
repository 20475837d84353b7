//! TypeScript/JavaScript ORM usage analysis
//!
//! A single synchronous pass over a parsed source file feeds every node to
//! the entity detector and the API usage detector. Detection is stateless;
//! each node visit either emits a record or is skipped, and nothing is
//! retained across files.

pub mod api;
pub mod arguments;
pub mod parser;
pub mod resolver;
pub mod schema;
pub mod simplify;
pub mod usage;

use crate::core::ast::TsAst;
use crate::core::Diagnostic;
use resolver::TypeResolver;
use tree_sitter::Node;

/// Run both detectors over every node of a parsed file
pub fn analyze_ast(ast: &TsAst, resolver: &dyn TypeResolver) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    visit(ast.root(), &ast.source, resolver, &mut diagnostics);
    diagnostics
}

fn visit(node: Node, source: &str, resolver: &dyn TypeResolver, out: &mut Vec<Diagnostic>) {
    match node.kind() {
        "class_declaration" => {
            if let Some(diagnostic) = schema::check_class(&node, source) {
                out.push(diagnostic);
            }
        }
        "call_expression" => {
            if let Some(diagnostic) = usage::check_call(&node, source, resolver) {
                out.push(diagnostic);
            }
        }
        "method_definition" => {
            if let Some(diagnostic) = usage::check_method_definition(&node, source) {
                out.push(diagnostic);
            }
        }
        _ => {}
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        visit(child, source, resolver, out);
    }
}
