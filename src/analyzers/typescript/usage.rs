//! Repository API usage detection
//!
//! Reports method calls that belong to the repository API surface, together
//! with the attributes their query arguments reference, and method
//! declarations wrapped in transaction decorators.

use super::api;
use super::arguments;
use super::parser::{
    decorator_expression, member_decorators, named_children, node_text, string_literal_value,
};
use super::resolver::TypeResolver;
use super::simplify::simplify;
use crate::core::{Diagnostic, DiagnosticMessage, Location, MethodCategory, MethodRecord};
use tree_sitter::Node;

const TRANSACTION_DECORATORS: &[&str] = &["Transaction", "LazyTransaction"];

/// Check one call expression against the repository API surface.
///
/// Only member calls are candidates; the accessed property name is classified
/// and unclassified names are skipped silently. Computed access with a string
/// index (`repo["findOne"](...)`) counts as a member call.
pub fn check_call(node: &Node, source: &str, resolver: &dyn TypeResolver) -> Option<Diagnostic> {
    if node.kind() != "call_expression" {
        return None;
    }
    let callee = node.child_by_field_name("function")?;
    let (object, method) = match callee.kind() {
        "member_expression" => {
            let property = callee.child_by_field_name("property")?;
            if property.kind() != "property_identifier" {
                return None;
            }
            (
                callee.child_by_field_name("object")?,
                node_text(&property, source).to_string(),
            )
        }
        "subscript_expression" => {
            let index = callee.child_by_field_name("index")?;
            (
                callee.child_by_field_name("object")?,
                string_literal_value(&index, source)?,
            )
        }
        _ => return None,
    };

    let category = api::classify(&method)?;

    let resolved = resolver.resolve(&object, source);
    let mut subject_types = vec![resolved.printed];
    subject_types.extend(resolved.base_printed);

    let args = node
        .child_by_field_name("arguments")
        .map(|arguments| named_children(&arguments))
        .unwrap_or_default();
    let attributes = arguments::lookup_attributes(&method, &args, source);

    Some(Diagnostic {
        location: Location::from_node(node),
        message: DiagnosticMessage::Method(MethodRecord {
            name: method,
            category,
            subject_text: simplify(&object, source),
            subject_types,
            attributes: attributes.into_iter().collect(),
        }),
    })
}

/// Check one method declaration for a transaction decorator.
///
/// Both the bare `@Transaction` reference and the called `@LazyTransaction()`
/// form qualify; the first match emits a synthetic record and stops the scan.
pub fn check_method_definition(node: &Node, source: &str) -> Option<Diagnostic> {
    if node.kind() != "method_definition" {
        return None;
    }

    for decorator in member_decorators(node) {
        let Some(expression) = decorator_expression(&decorator) else {
            continue;
        };
        let decorator_name = match expression.kind() {
            "identifier" => node_text(&expression, source),
            "call_expression" => {
                let Some(callee) = expression.child_by_field_name("function") else {
                    continue;
                };
                if callee.kind() != "identifier" {
                    continue;
                }
                node_text(&callee, source)
            }
            _ => continue,
        };
        if !TRANSACTION_DECORATORS.contains(&decorator_name) {
            continue;
        }

        let method_name = node
            .child_by_field_name("name")
            .filter(|name| name.kind() == "property_identifier")
            .map(|name| node_text(&name, source).to_string())
            .unwrap_or_default();

        return Some(Diagnostic {
            location: Location::from_node(node),
            message: DiagnosticMessage::Method(MethodRecord {
                name: method_name,
                category: MethodCategory::Transaction,
                subject_text: String::new(),
                subject_types: vec!["any".to_string()],
                attributes: Vec::new(),
            }),
        });
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::typescript::parser::parse_source;
    use crate::analyzers::typescript::resolver::UntypedResolver;
    use crate::core::ast::{JsVariant, TsAst};
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn parse(source: &str) -> TsAst {
        parse_source(source, &PathBuf::from("test.ts"), JsVariant::TypeScript).unwrap()
    }

    fn check_all(ast: &TsAst) -> Vec<Diagnostic> {
        fn walk(node: Node, source: &str, out: &mut Vec<Diagnostic>) {
            if let Some(diagnostic) = check_call(&node, source, &UntypedResolver) {
                out.push(diagnostic);
            }
            if let Some(diagnostic) = check_method_definition(&node, source) {
                out.push(diagnostic);
            }
            let mut cursor = node.walk();
            for child in node.children(&mut cursor) {
                walk(child, source, out);
            }
        }
        let mut out = Vec::new();
        walk(ast.root(), &ast.source, &mut out);
        out
    }

    fn method_records(diagnostics: Vec<Diagnostic>) -> Vec<MethodRecord> {
        diagnostics
            .into_iter()
            .map(|d| match d.message {
                DiagnosticMessage::Method(record) => record,
                other => panic!("expected method record, got {other:?}"),
            })
            .collect()
    }

    #[test]
    fn test_classified_member_call_reported() {
        let ast = parse(r#"repo.findOne({where: {name: "John"}});"#);
        let records = method_records(check_all(&ast));
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.name, "findOne");
        assert_eq!(record.category, MethodCategory::Read);
        assert_eq!(record.subject_text, "repo");
        assert_eq!(record.subject_types, vec!["any"]);
        let names: Vec<&str> = record.attributes.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["name"]);
    }

    #[test]
    fn test_unclassified_calls_are_silent() {
        let ast = parse("repo.toString();\nconsole.log(1);\nplainCall();");
        assert!(check_all(&ast).is_empty());
    }

    #[test]
    fn test_attributes_sorted_and_unique() {
        let ast = parse(r#"repo.findOneBy({z: 1, a: 2, z: 3});"#);
        let records = method_records(check_all(&ast));
        let names: Vec<&str> = records[0]
            .attributes
            .iter()
            .map(|a| a.name.as_str())
            .collect();
        assert_eq!(names, vec!["a", "z"]);
    }

    #[test]
    fn test_computed_string_access_counts() {
        let ast = parse(r#"repo["findOne"]({age: 1});"#);
        let records = method_records(check_all(&ast));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "findOne");
    }

    #[test]
    fn test_write_category() {
        let ast = parse(r#"repo.update({id: 1}, {name: "x"});"#);
        let records = method_records(check_all(&ast));
        assert_eq!(records[0].category, MethodCategory::Write);
        let names: Vec<&str> = records[0]
            .attributes
            .iter()
            .map(|a| a.name.as_str())
            .collect();
        // Only the first argument is the where-clause
        assert_eq!(names, vec!["id"]);
    }

    #[test]
    fn test_chained_subject() {
        let ast = parse("one.two.three(a, b, c).findOne({});");
        let records = method_records(check_all(&ast));
        assert_eq!(records[0].subject_text, "three(a, b, c)");
    }

    #[test]
    fn test_transaction_decorator_bare_and_called() {
        let ast = parse(
            "class UserService {\n  @Transaction\n  saveAll() {}\n  @LazyTransaction()\n  loadAll() {}\n}",
        );
        let records = method_records(check_all(&ast));
        assert_eq!(records.len(), 2);
        for record in &records {
            assert_eq!(record.category, MethodCategory::Transaction);
            assert_eq!(record.subject_text, "");
            assert_eq!(record.subject_types, vec!["any"]);
            assert!(record.attributes.is_empty());
        }
        assert_eq!(records[0].name, "saveAll");
        assert_eq!(records[1].name, "loadAll");
    }

    #[test]
    fn test_other_decorators_ignored() {
        let ast = parse("class S {\n  @Get()\n  index() {}\n}");
        assert!(check_all(&ast).is_empty());
    }

    #[test]
    fn test_call_location_spans_call() {
        let ast = parse("repo.findOne({});");
        let diagnostics = check_all(&ast);
        let location = diagnostics[0].location;
        assert_eq!(location.start_line, 0);
        assert_eq!(location.start_column, 0);
        assert_eq!(location.end_column, 16);
    }
}
