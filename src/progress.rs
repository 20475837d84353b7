//! Progress feedback for long analysis runs
//!
//! Uses `indicatif` for the single file-analysis phase. Progress is
//! suppressed in quiet mode (`--quiet` or `ORMSCOUT_QUIET`) and when stderr
//! is not a terminal, so CI logs and piped output stay clean.

use indicatif::{ProgressBar, ProgressStyle};

pub const TEMPLATE_FILE_ANALYSIS: &str = "{msg} {pos}/{len} files ({percent}%) - {eta}";

#[derive(Clone, Copy, Debug, Default)]
pub struct ProgressConfig {
    pub quiet: bool,
}

impl ProgressConfig {
    pub fn from_env(quiet: bool) -> Self {
        let env_quiet = std::env::var("ORMSCOUT_QUIET").is_ok();
        Self {
            quiet: quiet || env_quiet,
        }
    }

    pub fn should_show_progress(&self) -> bool {
        if self.quiet {
            return false;
        }
        use std::io::IsTerminal;
        std::io::stderr().is_terminal()
    }
}

/// Create the file-analysis bar, hidden when progress is suppressed
pub fn create_file_bar(config: &ProgressConfig, len: u64) -> ProgressBar {
    if !config.should_show_progress() {
        return ProgressBar::hidden();
    }
    let style = ProgressStyle::with_template(TEMPLATE_FILE_ANALYSIS)
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    let bar = ProgressBar::new(len);
    bar.set_style(style);
    bar.set_message("Analyzing");
    bar
}
