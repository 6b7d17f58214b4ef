//! Write a commented default configuration file.

use super::config::{default_config_path, VotingConfig};
use std::path::PathBuf;

pub fn execute(path: Option<PathBuf>, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    let path = path.unwrap_or_else(default_config_path);
    if path.exists() && !force {
        return Err(format!(
            "Config file '{}' already exists (use --force to overwrite)",
            path.display()
        )
        .into());
    }

    VotingConfig::create_default(&path)?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}
