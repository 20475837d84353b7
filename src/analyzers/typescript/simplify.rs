//! Call-target rendering
//!
//! Reduces a call's target expression to a compact label: member accesses
//! collapse to their property, chained calls keep their argument texts.
//! `one.two.three(a, b, c).findOne({})` reports subject `three(a, b, c)`.

use super::parser::{named_children, node_text};
use tree_sitter::Node;

/// Render a call target expression as a short subject string
pub fn simplify(node: &Node, source: &str) -> String {
    match node.kind() {
        "member_expression" => match node.child_by_field_name("property") {
            Some(property) => simplify(&property, source),
            None => stripped_text(node, source),
        },
        "call_expression" => {
            let callee = match node.child_by_field_name("function") {
                Some(callee) => simplify(&callee, source),
                None => String::new(),
            };
            let arguments = node
                .child_by_field_name("arguments")
                .map(|args| {
                    named_children(&args)
                        .iter()
                        .map(|arg| stripped_text(arg, source))
                        .collect::<Vec<_>>()
                        .join(", ")
                })
                .unwrap_or_default();
            format!("{callee}({arguments})")
        }
        _ => stripped_text(node, source),
    }
}

fn stripped_text(node: &Node, source: &str) -> String {
    strip_whitespace(node_text(node, source))
}

/// Remove newlines, tabs, and double-space runs in a single pass.
///
/// Single spaces survive so argument texts stay readable.
fn strip_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\n' | '\t' => {}
            ' ' if chars.peek() == Some(&' ') => {
                chars.next();
            }
            _ => out.push(c),
        }
    }
    out
}
