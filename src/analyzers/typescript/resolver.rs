//! Type resolution seam
//!
//! The detectors only need one answer about a call target: its printed
//! declared type and the printed types it derives from. That capability is
//! injected behind a trait so any typing front end can supply it; the
//! resolvers shipped here are the degraded defaults for running without a
//! type checker.

use crate::core::ast::TsAst;
use super::parser::node_text;
use std::collections::HashMap;
use tree_sitter::Node;

/// Printed type of an expression plus the printed types of its declared bases.
///
/// The strings are opaque display forms; they are concatenated into
/// `subjectTypes`, never parsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedType {
    pub printed: String,
    pub base_printed: Vec<String>,
}

impl ResolvedType {
    pub fn any() -> Self {
        Self {
            printed: "any".to_string(),
            base_printed: Vec::new(),
        }
    }

    /// A declared type with no symbol information behind it
    pub fn printed_only(printed: impl Into<String>) -> Self {
        Self {
            printed: printed.into(),
            base_printed: Vec::new(),
        }
    }
}

/// Answers "declared type and base types of this expression".
pub trait TypeResolver: Send + Sync {
    fn resolve(&self, expr: &Node<'_>, source: &str) -> ResolvedType;
}

/// Resolver for running without any type information: everything is `any`.
#[derive(Clone, Copy, Debug, Default)]
pub struct UntypedResolver;

impl TypeResolver for UntypedResolver {
    fn resolve(&self, _expr: &Node<'_>, _source: &str) -> ResolvedType {
        ResolvedType::any()
    }
}

/// Best-effort single-file resolver built from explicit type annotations.
///
/// Records the annotated type of every variable declarator, parameter, and
/// class field in the file, then answers lookups for identifier targets and
/// member accesses by their terminal name. No symbol graph exists, so base
/// types are never produced.
#[derive(Clone, Debug, Default)]
pub struct AnnotationResolver {
    annotations: HashMap<String, String>,
}

impl AnnotationResolver {
    pub fn from_ast(ast: &TsAst) -> Self {
        let mut annotations = HashMap::new();
        record_annotations(&ast.root(), &ast.source, &mut annotations);
        Self { annotations }
    }

    fn lookup(&self, name: &str) -> Option<&str> {
        self.annotations.get(name).map(String::as_str)
    }
}

impl TypeResolver for AnnotationResolver {
    fn resolve(&self, expr: &Node<'_>, source: &str) -> ResolvedType {
        let name = match expr.kind() {
            "identifier" => Some(node_text(expr, source)),
            "member_expression" => expr
                .child_by_field_name("property")
                .filter(|property| property.kind() == "property_identifier")
                .map(|property| node_text(&property, source)),
            _ => None,
        };

        name.and_then(|name| self.lookup(name))
            .map(ResolvedType::printed_only)
            .unwrap_or_else(ResolvedType::any)
    }
}

fn record_annotations(node: &Node, source: &str, out: &mut HashMap<String, String>) {
    match node.kind() {
        // const repo: Repository<User> = ...
        "variable_declarator" => {
            record_annotated_name(node, "name", source, out);
        }
        // function f(repo: Repository<User>) {}
        "required_parameter" | "optional_parameter" => {
            record_annotated_name(node, "pattern", source, out);
        }
        // class field: private repo: Repository<User>;
        "public_field_definition" => {
            record_annotated_name(node, "name", source, out);
        }
        _ => {}
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        record_annotations(&child, source, out);
    }
}

fn record_annotated_name(
    node: &Node,
    name_field: &str,
    source: &str,
    out: &mut HashMap<String, String>,
) {
    let Some(name) = node.child_by_field_name(name_field) else {
        return;
    };
    if !matches!(name.kind(), "identifier" | "property_identifier") {
        return;
    }
    let Some(annotation) = node.child_by_field_name("type") else {
        return;
    };
    // The type_annotation node includes the leading colon; take the type itself
    let Some(ty) = annotation.named_child(0) else {
        return;
    };
    out.entry(node_text(&name, source).to_string())
        .or_insert_with(|| node_text(&ty, source).trim().to_string());
}
