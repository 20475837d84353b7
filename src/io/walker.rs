//! Source file discovery
//!
//! Walks a root directory and selects the files to analyze by include and
//! exclude glob patterns, returning root-relative paths in a stable order.

use crate::core::errors::Result;
use glob::Pattern;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

pub const DEFAULT_INCLUDE: &str = "**/*.ts";
pub const DEFAULT_EXCLUDE: &str = "node_modules";

pub struct FileWalker {
    root: PathBuf,
    include: Vec<String>,
    exclude: Vec<String>,
}

impl FileWalker {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            include: vec![DEFAULT_INCLUDE.to_string()],
            exclude: vec![DEFAULT_EXCLUDE.to_string()],
        }
    }

    pub fn with_include(mut self, patterns: Vec<String>) -> Self {
        if !patterns.is_empty() {
            self.include = patterns;
        }
        self
    }

    pub fn with_exclude(mut self, patterns: Vec<String>) -> Self {
        if !patterns.is_empty() {
            self.exclude = patterns;
        }
        self
    }

    /// Discover matching files, as sorted root-relative paths
    pub fn walk(&self) -> Result<Vec<PathBuf>> {
        let include = compile_patterns(&self.include)?;
        let exclude = compile_patterns(&self.exclude)?;

        let mut files = Vec::new();
        let walker = WalkBuilder::new(&self.root)
            .hidden(false)
            .git_ignore(true)
            .build();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(error) => {
                    log::warn!("Skipping unreadable entry: {error}");
                    continue;
                }
            };
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(relative) = pathdiff::diff_paths(path, &self.root) else {
                continue;
            };
            if matches_any(&include, &relative) && !is_excluded(&exclude, &relative) {
                files.push(relative);
            }
        }

        files.sort();
        Ok(files)
    }
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|pattern| Ok(Pattern::new(pattern)?))
        .collect()
}

fn matches_any(patterns: &[Pattern], path: &Path) -> bool {
    let text = path.to_string_lossy();
    patterns.iter().any(|pattern| pattern.matches(&text))
}

/// A path is excluded when a pattern matches the whole relative path or any
/// single component, so a bare directory name like `node_modules` prunes the
/// entire subtree.
fn is_excluded(patterns: &[Pattern], path: &Path) -> bool {
    if matches_any(patterns, path) {
        return true;
    }
    path.components().any(|component| {
        let text = component.as_os_str().to_string_lossy();
        patterns.iter().any(|pattern| pattern.matches(&text))
    })
}
