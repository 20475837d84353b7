//! Entity schema detection
//!
//! Reports class declarations that mark themselves as persisted record types
//! via an `@Entity()`, `@ViewEntity()`, or `@ChildEntity()` decorator.

use super::parser::{class_decorators, decorator_expression, node_text};
use crate::core::{Diagnostic, DiagnosticMessage, EntityRecord, Location};
use tree_sitter::Node;

const SCHEMA_DECORATORS: &[&str] = &["Entity", "ViewEntity", "ChildEntity"];

/// Check one class declaration for a schema decorator.
///
/// Unnamed or undecorated classes are skipped. Only decorator *calls* with an
/// unqualified identifier callee qualify; the first match wins, so a class
/// carrying several qualifying decorators is still reported once.
pub fn check_class(node: &Node, source: &str) -> Option<Diagnostic> {
    if node.kind() != "class_declaration" {
        return None;
    }
    let name = node.child_by_field_name("name")?;

    for decorator in class_decorators(node) {
        let Some(expression) = decorator_expression(&decorator) else {
            continue;
        };
        if expression.kind() != "call_expression" {
            continue;
        }
        let Some(callee) = expression.child_by_field_name("function") else {
            continue;
        };
        if callee.kind() != "identifier" {
            continue;
        }
        if SCHEMA_DECORATORS.contains(&node_text(&callee, source)) {
            return Some(Diagnostic {
                location: Location::from_node(node),
                message: DiagnosticMessage::Entity(EntityRecord {
                    name: node_text(&name, source).to_string(),
                }),
            });
        }
    }
    None
}
