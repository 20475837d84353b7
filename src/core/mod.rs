pub mod ast;
pub mod errors;

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Zero-based source span of a syntax node.
///
/// Lines and columns follow tree-sitter's native convention (both zero-based);
/// every location emitted by this crate uses the same convention.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub start_line: usize,
    pub start_column: usize,
    pub end_line: usize,
    pub end_column: usize,
}

impl Location {
    pub fn new(start_line: usize, start_column: usize, end_line: usize, end_column: usize) -> Self {
        Self {
            start_line,
            start_column,
            end_line,
            end_column,
        }
    }

    /// Span of a tree-sitter node
    pub fn from_node(node: &tree_sitter::Node) -> Self {
        let start = node.start_position();
        let end = node.end_position();
        Self {
            start_line: start.row,
            start_column: start.column,
            end_line: end.row,
            end_column: end.column,
        }
    }
}

/// A queried column name together with the span of the key that named it.
///
/// Equality and ordering are by `name` alone; two attributes with the same
/// name are duplicates regardless of where they appear.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub location: Location,
}

impl Attribute {
    pub fn new(name: impl Into<String>, location: Location) -> Self {
        Self {
            name: name.into(),
            location,
        }
    }
}

impl PartialEq for Attribute {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Attribute {}

impl PartialOrd for Attribute {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Attribute {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

/// Category of a repository API method
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MethodCategory {
    Read,
    Write,
    Other,
    Transaction,
}

impl std::fmt::Display for MethodCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MethodCategory::Read => "read",
            MethodCategory::Write => "write",
            MethodCategory::Other => "other",
            MethodCategory::Transaction => "transaction",
        };
        write!(f, "{s}")
    }
}

/// A class declaration recognized as a schema entity
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct EntityRecord {
    pub name: String,
}

/// A recognized repository API usage
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MethodRecord {
    pub name: String,
    pub category: MethodCategory,
    pub subject_text: String,
    pub subject_types: Vec<String>,
    /// Name-unique, lexicographically sorted by name
    pub attributes: Vec<Attribute>,
}

/// The single message union handed to the report boundary
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind")]
pub enum DiagnosticMessage {
    #[serde(rename = "entity")]
    Entity(EntityRecord),
    #[serde(rename = "method")]
    Method(MethodRecord),
}

/// A message paired with the span of the AST node that triggered it
#[derive(Clone, Debug, PartialEq)]
pub struct Diagnostic {
    pub location: Location,
    pub message: DiagnosticMessage,
}

/// One analysis result: a message attributed to a file and node span
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UsageResult {
    pub file_path: String,
    pub location: Location,
    pub message: DiagnosticMessage,
}

impl UsageResult {
    pub fn from_diagnostic(file_path: impl Into<String>, diagnostic: Diagnostic) -> Self {
        Self {
            file_path: file_path.into(),
            location: diagnostic.location,
            message: diagnostic.message,
        }
    }
}

/// The persisted analysis document.
///
/// `done_files` records every file already analyzed so a later run can resume
/// without re-analyzing them.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisOutput {
    pub results: Vec<UsageResult>,
    pub done_files: Vec<String>,
}
