//! Per-file analysis entry points

pub mod typescript;

use crate::core::ast::TsAst;
use crate::core::errors::Result;
use crate::core::Diagnostic;
use std::path::Path;
use typescript::resolver::{AnnotationResolver, TypeResolver};

pub use typescript::analyze_ast;

/// Parse a source file and run the detectors over it.
///
/// The analysis is a pure function of the file's content plus the resolver's
/// answers; files can be processed in any order and in parallel.
pub fn analyze_source(
    content: &str,
    path: &Path,
    resolver: &dyn TypeResolver,
) -> Result<Vec<Diagnostic>> {
    let variant = typescript::parser::detect_variant(path);
    let ast = typescript::parser::parse_source(content, path, variant)?;
    Ok(analyze_ast(&ast, resolver))
}

/// Analyze a file with the default annotation-based resolver.
///
/// The resolver is rebuilt per file from that file's own type annotations, so
/// no state crosses file boundaries.
pub fn analyze_file(content: &str, path: &Path) -> Result<Vec<Diagnostic>> {
    let variant = typescript::parser::detect_variant(path);
    let ast = typescript::parser::parse_source(content, path, variant)?;
    let resolver = AnnotationResolver::from_ast(&ast);
    Ok(analyze_ast(&ast, &resolver))
}
