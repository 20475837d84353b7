//! The init command: write a default configuration file.

use crate::config::{default_config_contents, CONFIG_FILE_NAME};
use anyhow::{bail, Context, Result};
use std::path::Path;

pub fn init_config(force: bool) -> Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);
    if path.exists() && !force {
        bail!("{CONFIG_FILE_NAME} already exists (use --force to overwrite)");
    }
    std::fs::write(path, default_config_contents())
        .with_context(|| format!("Cannot write {CONFIG_FILE_NAME}"))?;
    println!("Wrote {CONFIG_FILE_NAME}");
    Ok(())
}
