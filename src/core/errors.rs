//! Shared error types for the library

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for ormscout operations
#[derive(Debug, Error)]
pub enum Error {
    /// Tree-sitter grammar failed to load
    #[error("Grammar error: {0}")]
    Grammar(String),

    /// Source file could not be parsed
    #[error("Parse error in {}", file.display())]
    Parse { file: PathBuf },

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Pattern errors
    #[error(transparent)]
    Pattern(#[from] glob::PatternError),
}

impl Error {
    /// Create a parse error for a source file
    pub fn parse(file: impl Into<PathBuf>) -> Self {
        Self::Parse { file: file.into() }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;
