//! Optional project configuration
//!
//! An `.ormscout.toml` at the analysis root can set discovery patterns and
//! batching defaults; command-line flags take precedence over it. A malformed
//! file warns and falls back to defaults rather than aborting the run.

use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = ".ormscout.toml";

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct OrmscoutConfig {
    /// Include glob patterns, relative to the analysis root
    pub include: Option<Vec<String>>,
    /// Exclude glob patterns or directory names
    pub exclude: Option<Vec<String>>,
    /// Files analyzed per batch; the whole run is one batch when unset
    pub batch: Option<usize>,
    /// Output document path
    pub output: Option<PathBuf>,
}

/// Load `.ormscout.toml` from the analysis root if present
pub fn load_config(root: &Path) -> OrmscoutConfig {
    let path = root.join(CONFIG_FILE_NAME);
    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(error) => {
            if error.kind() != std::io::ErrorKind::NotFound {
                log::warn!("Failed to read {}: {error}", path.display());
            }
            return OrmscoutConfig::default();
        }
    };

    match toml::from_str(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", path.display());
            config
        }
        Err(error) => {
            log::warn!("Failed to parse {}: {error}. Using defaults.", path.display());
            OrmscoutConfig::default()
        }
    }
}

/// Contents written by `ormscout init`
pub fn default_config_contents() -> &'static str {
    r#"# ormscout configuration

# Glob patterns selecting the files to analyze, relative to the root.
include = ["**/*.ts"]

# Glob patterns or directory names to skip.
exclude = ["node_modules"]

# Number of files per batch; partial output is written after each batch.
# Remove to analyze everything in one batch.
# batch = 500

# Where to write the analysis document.
# output = "messages.json"
"#
}
