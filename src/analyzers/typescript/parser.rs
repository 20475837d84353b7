//! Tree-sitter parser integration for JavaScript/TypeScript
//!
//! Provides parsing plus the small node utilities the detectors share.

use crate::core::ast::{JsVariant, TsAst};
use crate::core::errors::{Error, Result};
use std::path::Path;
use tree_sitter::{Language, Node, Parser};

/// Get the tree-sitter language for a JS variant
fn get_language(variant: JsVariant) -> Language {
    match variant {
        JsVariant::JavaScript | JsVariant::Jsx => tree_sitter_javascript::LANGUAGE.into(),
        JsVariant::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
        JsVariant::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
    }
}

/// Parse source code into a tree-sitter AST
pub fn parse_source(content: &str, path: &Path, variant: JsVariant) -> Result<TsAst> {
    let mut parser = Parser::new();
    let language = get_language(variant);

    parser
        .set_language(&language)
        .map_err(|e| Error::Grammar(e.to_string()))?;

    let tree = parser.parse(content, None).ok_or_else(|| Error::parse(path))?;

    Ok(TsAst {
        tree,
        source: content.to_string(),
        path: path.to_path_buf(),
        variant,
    })
}

/// Determine language variant from file path, defaulting to TypeScript
pub fn detect_variant(path: &Path) -> JsVariant {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(JsVariant::from_extension)
        .unwrap_or(JsVariant::TypeScript)
}

/// Get text for a tree-sitter node
pub fn node_text<'a>(node: &Node, source: &'a str) -> &'a str {
    &source[node.start_byte()..node.end_byte()]
}

/// Named children of a node, skipping interleaved comments
pub fn named_children<'a>(node: &Node<'a>) -> Vec<Node<'a>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect()
}

/// Value of a string literal node, without the surrounding quotes.
///
/// Escape sequences are kept verbatim; attribute names in practice do not
/// contain them.
pub fn string_literal_value(node: &Node, source: &str) -> Option<String> {
    if node.kind() != "string" {
        return None;
    }
    let fragments: String = named_children(node)
        .iter()
        .filter(|child| child.kind() == "string_fragment")
        .map(|child| node_text(child, source))
        .collect();
    Some(fragments)
}

/// Decorators attached to a class declaration, in source order.
///
/// An exported class's decorators hang off the wrapping export statement, so
/// both attachment points are scanned.
pub fn class_decorators<'a>(node: &Node<'a>) -> Vec<Node<'a>> {
    let mut decorators = Vec::new();
    if let Some(parent) = node.parent() {
        if parent.kind() == "export_statement" {
            collect_decorator_children(&parent, &mut decorators);
        }
    }
    collect_decorator_children(node, &mut decorators);
    decorators
}

/// Decorators attached to a class member.
///
/// Depending on grammar version these appear either as children of the member
/// node or as preceding siblings inside the class body.
pub fn member_decorators<'a>(node: &Node<'a>) -> Vec<Node<'a>> {
    let mut decorators = Vec::new();

    let mut preceding = Vec::new();
    let mut prev = node.prev_sibling();
    while let Some(sibling) = prev {
        if sibling.kind() != "decorator" {
            break;
        }
        preceding.push(sibling);
        prev = sibling.prev_sibling();
    }
    preceding.reverse();
    decorators.extend(preceding);

    collect_decorator_children(node, &mut decorators);
    decorators
}

fn collect_decorator_children<'a>(node: &Node<'a>, out: &mut Vec<Node<'a>>) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "decorator" {
            out.push(child);
        }
    }
}

/// The expression a decorator applies: identifier, member access, or call
pub fn decorator_expression<'a>(decorator: &Node<'a>) -> Option<Node<'a>> {
    decorator.named_child(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn parse_ts(source: &str) -> TsAst {
        parse_source(source, &PathBuf::from("test.ts"), JsVariant::TypeScript).unwrap()
    }

    #[test]
    fn test_detect_variant() {
        assert_eq!(detect_variant(Path::new("a.ts")), JsVariant::TypeScript);
        assert_eq!(detect_variant(Path::new("a.tsx")), JsVariant::Tsx);
        assert_eq!(detect_variant(Path::new("a.js")), JsVariant::JavaScript);
        assert_eq!(detect_variant(Path::new("a.jsx")), JsVariant::Jsx);
        // No extension falls back to TypeScript
        assert_eq!(detect_variant(Path::new("Makefile")), JsVariant::TypeScript);
    }

    #[test]
    fn test_parse_typescript() {
        let ast = parse_ts("const x: number = 42;");
        assert!(!ast.root().has_error());
        assert_eq!(ast.variant, JsVariant::TypeScript);
    }

    #[test]
    fn test_node_text() {
        let ast = parse_ts("const x = 42;");
        assert_eq!(node_text(&ast.root(), &ast.source), "const x = 42;");
    }

    #[test]
    fn test_string_literal_value() {
        let ast = parse_ts(r#"const x = "hello";"#);
        let mut string_node = None;
        let mut cursor = ast.root().walk();
        let mut stack = vec![ast.root()];
        while let Some(node) = stack.pop() {
            if node.kind() == "string" {
                string_node = Some(node);
                break;
            }
            stack.extend(node.children(&mut cursor));
        }
        let value = string_literal_value(&string_node.unwrap(), &ast.source);
        assert_eq!(value.as_deref(), Some("hello"));
    }

    #[test]
    fn test_class_decorators_found() {
        let ast = parse_ts("@Entity()\nclass User {}\n");
        let mut class_node = None;
        let mut cursor = ast.root().walk();
        for child in ast.root().children(&mut cursor) {
            if child.kind() == "class_declaration" {
                class_node = Some(child);
            }
        }
        let decorators = class_decorators(&class_node.unwrap());
        assert_eq!(decorators.len(), 1);
    }

    #[test]
    fn test_exported_class_decorators_found() {
        let ast = parse_ts("@Entity()\nexport class User {}\n");
        let mut class_node = None;
        let mut stack = vec![ast.root()];
        let mut cursor = ast.root().walk();
        while let Some(node) = stack.pop() {
            if node.kind() == "class_declaration" {
                class_node = Some(node);
                break;
            }
            stack.extend(node.children(&mut cursor));
        }
        let decorators = class_decorators(&class_node.unwrap());
        assert!(!decorators.is_empty());
    }
}
