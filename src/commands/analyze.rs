//! The analyze command: discovery, batching, resumption, and persistence
//! around the per-file analysis core.

use crate::analyzers::analyze_file;
use crate::core::{AnalysisOutput, Diagnostic, UsageResult};
use crate::io::output::{load_output, save_output};
use crate::io::walker::FileWalker;
use crate::progress::{create_file_bar, ProgressConfig};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug)]
pub struct AnalyzeConfig {
    /// Analysis root directory
    pub path: PathBuf,
    /// Include glob patterns relative to the root
    pub include: Vec<String>,
    /// Exclude glob patterns or directory names
    pub exclude: Vec<String>,
    /// Output document path
    pub output: PathBuf,
    /// Files per batch; one batch for the whole run when unset
    pub batch: Option<usize>,
    /// Seed results and skip files from an existing output document
    pub resume: bool,
    /// Analyze files on the rayon pool
    pub parallel: bool,
    /// Suppress progress output
    pub quiet: bool,
}

pub fn run_analyze(config: AnalyzeConfig) -> Result<()> {
    let root = config
        .path
        .canonicalize()
        .with_context(|| format!("Cannot resolve root {}", config.path.display()))?;

    let files = FileWalker::new(root.clone())
        .with_include(config.include.clone())
        .with_exclude(config.exclude.clone())
        .walk()
        .context("File discovery failed")?;
    log::info!("Found {} matching files under {}", files.len(), root.display());

    let mut output = load_previous(&config)?;
    let done: HashSet<String> = output.done_files.iter().cloned().collect();

    let total = files.len();
    let pending: Vec<PathBuf> = files
        .into_iter()
        .filter(|file| !done.contains(&relative_key(file)))
        .collect();
    let skipped = total - pending.len();
    if skipped > 0 {
        log::info!("Skipping {skipped} already analyzed files");
    }

    let progress = ProgressConfig::from_env(config.quiet);
    let bar = create_file_bar(&progress, pending.len() as u64);

    let batch_size = config.batch.unwrap_or(pending.len()).max(1);
    for batch in pending.chunks(batch_size) {
        let analyzed: Vec<(String, Vec<Diagnostic>)> = if config.parallel {
            batch
                .par_iter()
                .filter_map(|file| {
                    let result = analyze_one(&root, file);
                    bar.inc(1);
                    result
                })
                .collect()
        } else {
            batch
                .iter()
                .filter_map(|file| {
                    let result = analyze_one(&root, file);
                    bar.inc(1);
                    result
                })
                .collect()
        };

        for (file, diagnostics) in analyzed {
            for diagnostic in diagnostics {
                output
                    .results
                    .push(UsageResult::from_diagnostic(file.clone(), diagnostic));
            }
            output.done_files.push(file);
        }

        save_output(&output, &config.output)
            .with_context(|| format!("Cannot write {}", config.output.display()))?;
    }

    bar.finish_and_clear();
    log::info!(
        "Wrote {} results for {} files to {}",
        output.results.len(),
        output.done_files.len(),
        config.output.display()
    );
    Ok(())
}

fn load_previous(config: &AnalyzeConfig) -> Result<AnalysisOutput> {
    if config.resume && config.output.exists() {
        let output = load_output(&config.output)
            .with_context(|| format!("Cannot load {}", config.output.display()))?;
        log::info!(
            "Resuming from {} ({} prior results)",
            config.output.display(),
            output.results.len()
        );
        Ok(output)
    } else {
        Ok(AnalysisOutput::default())
    }
}

/// Analyze one file; read and parse failures are logged and skipped so the
/// run continues, and the file is not marked done.
fn analyze_one(root: &Path, relative: &Path) -> Option<(String, Vec<Diagnostic>)> {
    let absolute = root.join(relative);
    let content = match std::fs::read_to_string(&absolute) {
        Ok(content) => content,
        Err(error) => {
            log::warn!("Cannot read {}: {error}", absolute.display());
            return None;
        }
    };
    match analyze_file(&content, relative) {
        Ok(diagnostics) => Some((relative_key(relative), diagnostics)),
        Err(error) => {
            log::warn!("Cannot analyze {}: {error}", absolute.display());
            None
        }
    }
}

fn relative_key(path: &Path) -> String {
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DiagnosticMessage;
    use std::fs;

    fn write_file(root: &Path, relative: &str, contents: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn config_for(root: &Path, output: PathBuf) -> AnalyzeConfig {
        AnalyzeConfig {
            path: root.to_path_buf(),
            include: vec![],
            exclude: vec![],
            output,
            batch: None,
            resume: false,
            parallel: false,
            quiet: true,
        }
    }

    #[test]
    fn test_run_analyze_writes_document() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write_file(root, "src/user.entity.ts", "@Entity()\nexport class User {}\n");
        write_file(
            root,
            "src/user.service.ts",
            "repo.findOneBy({id: 1});\n",
        );

        let out_path = root.join("messages.json");
        run_analyze(config_for(root, out_path.clone())).unwrap();

        let output = load_output(&out_path).unwrap();
        assert_eq!(output.done_files.len(), 2);
        assert_eq!(output.results.len(), 2);
        assert!(output
            .done_files
            .iter()
            .any(|f| f == "src/user.entity.ts"));
    }

    #[test]
    fn test_resume_skips_done_files() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write_file(root, "a.ts", "repo.findOneBy({id: 1});\n");
        write_file(root, "b.ts", "repo.findOneBy({name: \"x\"});\n");

        let out_path = root.join("messages.json");
        let mut config = config_for(root, out_path.clone());
        run_analyze(config.clone()).unwrap();
        let first = load_output(&out_path).unwrap();
        assert_eq!(first.done_files.len(), 2);

        // Re-running with --continue must not duplicate anything
        config.resume = true;
        run_analyze(config).unwrap();
        let second = load_output(&out_path).unwrap();
        assert_eq!(second.results.len(), first.results.len());
        assert_eq!(second.done_files.len(), first.done_files.len());
    }

    #[test]
    fn test_batching_persists_progress() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        for i in 0..4 {
            write_file(root, &format!("f{i}.ts"), "repo.findOneBy({id: 1});\n");
        }

        let out_path = root.join("messages.json");
        let mut config = config_for(root, out_path.clone());
        config.batch = Some(2);
        run_analyze(config).unwrap();

        let output = load_output(&out_path).unwrap();
        assert_eq!(output.done_files.len(), 4);
        assert_eq!(output.results.len(), 4);
    }

    #[test]
    fn test_records_carry_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write_file(root, "src/svc.ts", "repo.findOne({where: {id: 1}});\n");

        let out_path = root.join("messages.json");
        run_analyze(config_for(root, out_path.clone())).unwrap();

        let output = load_output(&out_path).unwrap();
        assert_eq!(output.results[0].file_path, "src/svc.ts");
        match &output.results[0].message {
            DiagnosticMessage::Method(record) => assert_eq!(record.name, "findOne"),
            other => panic!("expected method record, got {other:?}"),
        }
    }
}
