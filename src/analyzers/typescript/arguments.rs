//! Queried-attribute extraction from call arguments
//!
//! Two mutually recursive modes walk an argument's structural form:
//! where-mode treats top-level object keys as column names; options-mode
//! unwraps a find-options envelope to its `where` clause first, falling back
//! to where-mode for legacy call sites that pass a bare where object where an
//! envelope is expected.

use super::parser::{named_children, node_text, string_literal_value};
use crate::core::{Attribute, Location};
use std::collections::BTreeSet;
use tree_sitter::Node;

/// Methods whose first argument is a bare where-clause
const WHERE_FIRST_ARG: &[&str] = &[
    "countBy",
    "findBy",
    "findAndCountBy",
    "findOneBy",
    "findOneByOrFail",
    "increment",
    "decrement",
    "update",
    "delete",
    "softDelete",
    "restore",
];

/// Methods whose first argument is a find-options envelope
const OPTIONS_FIRST_ARG: &[&str] = &[
    "count",
    "exist",
    "find",
    "findAndCount",
    "findOne",
    "findOneOrFail",
];

/// Aggregations: first argument is the aggregated column, the where-clause
/// comes second
const WHERE_SECOND_ARG: &[&str] = &["sum", "average", "minimum", "maximum"];

/// Top-level keys that mark an object as a find-options envelope rather than
/// a legacy bare where-clause. A real column named after one of these
/// keywords defeats the fallback; that false negative is accepted.
const ENVELOPE_KEYS: &[&str] = &[
    "comment",
    "select",
    "relations",
    "relationLoadStrategy",
    "join",
    "order",
    "cache",
    "lock",
    "withDeleted",
    "loadRelationIds",
    "loadEagerRelations",
    "transaction",
    "skip",
    "take",
];

/// Extract the attributes queried by a classified method call.
///
/// `args` are the call's argument expressions in order. Methods outside the
/// dispatch tables, and calls missing the argument at the dispatched
/// position, yield the empty set.
pub fn lookup_attributes(method: &str, args: &[Node], source: &str) -> BTreeSet<Attribute> {
    if WHERE_FIRST_ARG.contains(&method) {
        args.first()
            .map(|arg| parse_where(arg, source))
            .unwrap_or_default()
    } else if OPTIONS_FIRST_ARG.contains(&method) {
        args.first()
            .map(|arg| parse_options(arg, source))
            .unwrap_or_default()
    } else if WHERE_SECOND_ARG.contains(&method) {
        args.get(1)
            .map(|arg| parse_where(arg, source))
            .unwrap_or_default()
    } else {
        BTreeSet::new()
    }
}

/// Walk a where-clause expression and collect the column names it mentions.
///
/// Only the key names at the top structural level of each object are
/// attributes; property values are never descended into. Duplicate names keep
/// the first-visited location.
pub fn parse_where(node: &Node, source: &str) -> BTreeSet<Attribute> {
    let mut attributes = BTreeSet::new();
    collect_where(node, source, &mut attributes);
    attributes
}

fn collect_where(node: &Node, source: &str, out: &mut BTreeSet<Attribute>) {
    match node.kind() {
        "spread_element" => {
            if let Some(operand) = named_children(node).first() {
                collect_where(operand, source, out);
            }
        }
        "array" => {
            for element in named_children(node) {
                collect_where(&element, source, out);
            }
        }
        "object" => {
            for property in named_children(node) {
                match property.kind() {
                    "spread_element" => collect_where(&property, source, out),
                    "pair" => {
                        if let Some(key) = property.child_by_field_name("key") {
                            if let Some((name, location)) = property_key_name(&key, source) {
                                out.insert(Attribute::new(name, location));
                            }
                        }
                    }
                    "shorthand_property_identifier" => {
                        out.insert(Attribute::new(
                            node_text(&property, source),
                            Location::from_node(&property),
                        ));
                    }
                    "method_definition" => {
                        if let Some(name) = property.child_by_field_name("name") {
                            if let Some((text, location)) = property_key_name(&name, source) {
                                out.insert(Attribute::new(text, location));
                            }
                        }
                    }
                    _ => {}
                }
            }
        }
        _ => {}
    }
}

/// Walk a find-options envelope.
///
/// A `where` property short-circuits to where-mode over its value. Otherwise
/// an object that mentions no envelope keyword is treated as a legacy bare
/// where-clause and re-dispatched wholesale.
pub fn parse_options(node: &Node, source: &str) -> BTreeSet<Attribute> {
    match node.kind() {
        "spread_element" => named_children(node)
            .first()
            .map(|operand| parse_options(operand, source))
            .unwrap_or_default(),
        "object" => {
            let mut legacy = true;
            for property in named_children(node) {
                let key_name = match property.kind() {
                    "pair" => property
                        .child_by_field_name("key")
                        .filter(|key| key.kind() == "property_identifier")
                        .map(|key| node_text(&key, source).to_string()),
                    "shorthand_property_identifier" => {
                        Some(node_text(&property, source).to_string())
                    }
                    _ => None,
                };
                let Some(key_name) = key_name else { continue };

                if key_name == "where" {
                    let target = where_value(&property);
                    return target
                        .map(|value| parse_where(&value, source))
                        .unwrap_or_default();
                }
                if ENVELOPE_KEYS.contains(&key_name.as_str()) {
                    legacy = false;
                }
            }
            if legacy {
                parse_where(node, source)
            } else {
                BTreeSet::new()
            }
        }
        _ => BTreeSet::new(),
    }
}

/// The expression a `where` property contributes: its value, or the
/// right-hand side when the value is an assignment.
fn where_value<'a>(property: &Node<'a>) -> Option<Node<'a>> {
    let value = property.child_by_field_name("value")?;
    if value.kind() == "assignment_expression" {
        value.child_by_field_name("right")
    } else {
        Some(value)
    }
}

/// Resolve a property key to its attribute name and span.
///
/// Identifier keys use their text, literal keys their string value; computed
/// keys contribute the inner identifier or string literal, matching how the
/// key is reported by ESTree-style front ends.
fn property_key_name(key: &Node, source: &str) -> Option<(String, Location)> {
    match key.kind() {
        "property_identifier" | "identifier" => Some((
            node_text(key, source).to_string(),
            Location::from_node(key),
        )),
        "string" => {
            string_literal_value(key, source).map(|value| (value, Location::from_node(key)))
        }
        "number" => Some((
            node_text(key, source).to_string(),
            Location::from_node(key),
        )),
        "computed_property_name" => {
            let inner = named_children(key);
            let inner = inner.first()?;
            property_key_name(inner, source)
        }
        _ => None,
    }
}
