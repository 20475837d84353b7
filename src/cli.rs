use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ormscout")]
#[command(about = "TypeORM repository API usage and entity schema analyzer", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a TypeScript codebase for ORM usage
    Analyze {
        /// Root directory to analyze
        path: PathBuf,

        /// Include glob patterns, relative to the root
        #[arg(long, value_delimiter = ',')]
        include: Option<Vec<String>>,

        /// Exclude glob patterns or directory names
        #[arg(long, value_delimiter = ',')]
        exclude: Option<Vec<String>>,

        /// Output file for the analysis document
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of files per batch (partial output is written after each batch)
        #[arg(long)]
        batch: Option<usize>,

        /// Continue from an existing output file, skipping analyzed files
        #[arg(long = "continue")]
        resume: bool,

        /// Disable parallel file analysis
        #[arg(long = "no-parallel")]
        no_parallel: bool,

        /// Suppress progress output
        #[arg(short, long, env = "ORMSCOUT_QUIET")]
        quiet: bool,
    },

    /// Write a default .ormscout.toml configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
