//! Create a fresh strategy snapshot from a configuration file.

use super::config::VotingConfig;
use single_voting::persistence::StateFile;
use single_voting::strategy::SingleVoting;
use std::path::{Path, PathBuf};
use tracing::info;

pub fn execute(
    config_path: &Path,
    state_path: PathBuf,
    force: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = StateFile::new(state_path);
    if file.exists() && !force {
        return Err(format!(
            "State file '{}' already exists (use --force to overwrite)",
            file.path().display()
        )
        .into());
    }

    let config = VotingConfig::load(config_path)?;
    let params = config.strategy.to_init_params()?;
    let address = config.strategy.address()?;

    let strategy = SingleVoting::new(address, config.strategy.chain_id, params)?;
    file.save(strategy.snapshot())?;

    info!(strategy = %address, "strategy snapshot created");
    println!("Created strategy snapshot at {}", file.path().display());
    Ok(())
}
