use anyhow::Result;
use clap::Parser;
use ormscout::cli::{Cli, Commands};
use ormscout::commands::analyze::AnalyzeConfig;
use ormscout::config::load_config;
use std::path::PathBuf;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Analyze {
            path,
            include,
            exclude,
            output,
            batch,
            resume,
            no_parallel,
            quiet,
        } => {
            let config = build_analyze_config(
                path, include, exclude, output, batch, resume, no_parallel, quiet,
            );
            ormscout::commands::analyze::run_analyze(config)
        }
        Commands::Init { force } => ormscout::commands::init::init_config(force),
    }
}

/// Merge CLI flags over the optional `.ormscout.toml`; flags win.
#[allow(clippy::too_many_arguments)]
fn build_analyze_config(
    path: PathBuf,
    include: Option<Vec<String>>,
    exclude: Option<Vec<String>>,
    output: Option<PathBuf>,
    batch: Option<usize>,
    resume: bool,
    no_parallel: bool,
    quiet: bool,
) -> AnalyzeConfig {
    let file_config = load_config(&path);
    AnalyzeConfig {
        path,
        include: include.or(file_config.include).unwrap_or_default(),
        exclude: exclude.or(file_config.exclude).unwrap_or_default(),
        output: output
            .or(file_config.output)
            .unwrap_or_else(|| PathBuf::from("messages.json")),
        batch: batch.or(file_config.batch),
        resume,
        parallel: !no_parallel,
        quiet,
    }
}
