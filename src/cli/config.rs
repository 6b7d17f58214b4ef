//! Operator configuration file handling
//!
//! Provides default configuration generation and loading for a single voting
//! strategy deployment. Configuration files are TOML.
//!
//! Durations are human-readable (`"60s"`, `"1h"`, `"7 days"`) and addresses
//! are `0x`-prefixed hex.

use serde::{Deserialize, Serialize};
use single_voting::strategy::InitParams;
use single_voting::types::Address;
use std::fs;
use std::path::{Path, PathBuf};

/// Default log level
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VotingConfig {
    /// Strategy deployment parameters
    pub strategy: StrategyConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Strategy parameters, converted to `InitParams` at set-up time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyConfig {
    /// Name bound into the typed-data domain of signed votes
    pub name: String,

    /// Address the strategy is deployed at (verifying contract)
    pub address: String,

    pub chain_id: u64,

    /// Controlling identity allowed to manage members
    pub admin: String,

    /// Proposal router allowed to open ballots
    pub router: String,

    /// Voting window, e.g. "60s" or "3 days"
    pub voting_period: String,

    /// Yes votes needed to pass
    pub quorum_threshold: u64,

    /// Delay between passing and execution
    #[serde(default = "default_time_lock")]
    pub time_lock_period: String,

    /// Membership floor enforced on removal
    #[serde(default)]
    pub min_members: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    pub file: Option<PathBuf>,
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_time_lock() -> String {
    "0s".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            file: None,
        }
    }
}

/// Parse a human-readable duration to whole seconds.
pub fn parse_duration_secs(input: &str) -> Result<u64, String> {
    if input.trim() == "0" {
        return Ok(0);
    }
    humantime::parse_duration(input.trim())
        .map(|d| d.as_secs())
        .map_err(|e| format!("Invalid duration '{}': {}", input, e))
}

fn parse_address(field: &str, value: &str) -> Result<Address, String> {
    value
        .parse()
        .map_err(|e| format!("Invalid {} address '{}': {}", field, value, e))
}

impl StrategyConfig {
    pub fn address(&self) -> Result<Address, String> {
        parse_address("strategy", &self.address)
    }

    /// Convert to validated strategy initialization parameters.
    pub fn to_init_params(&self) -> Result<InitParams, Box<dyn std::error::Error>> {
        let params = InitParams {
            admin: parse_address("admin", &self.admin)?,
            router: parse_address("router", &self.router)?,
            voting_period: parse_duration_secs(&self.voting_period)?,
            quorum_threshold: self.quorum_threshold,
            time_lock_period: parse_duration_secs(&self.time_lock_period)?,
            name: self.name.clone(),
            min_members: self.min_members,
        };
        params.validate()?;
        Ok(params)
    }
}

impl VotingConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;

        let config: VotingConfig = toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    #[allow(dead_code)]
    pub fn save(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        fs::write(path, contents)
            .map_err(|e| format!("Failed to write config file '{}': {}", path.display(), e))?;

        Ok(())
    }

    /// Generate default configuration content as a string with comments
    pub fn generate_default_toml() -> String {
        r#"# Single voting strategy configuration
#
# One member, one vote. A proposal passes when its yes votes reach
# quorum_threshold before the voting period ends, and may be executed
# time_lock_period after it is finalized.

[strategy]
# Name bound into signed votes (typed-data domain name)
name = "Single Voting"

# Address the strategy is deployed at; signed votes are bound to it
address = "0x0000000000000000000000000000000000000001"
chain_id = 1

# Controlling identity (usually the avatar) allowed to add/remove members
admin = "0x0000000000000000000000000000000000000002"

# Proposal router allowed to open ballots; also has admin rights
router = "0x0000000000000000000000000000000000000003"

# Durations accept humantime syntax: "60s", "1h", "3 days"
voting_period = "3 days"
time_lock_period = "1 day"

# Yes votes required to pass (absolute count, at least 1)
quorum_threshold = 2

# Removals that would drop membership below this floor are rejected
min_members = 0

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log file path (optional, logs to stderr if not specified)
# file = "/var/log/single-voting/single-voting.log"
"#
        .to_string()
    }

    /// Create and save a default configuration file
    pub fn create_default(config_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let contents = Self::generate_default_toml();

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        fs::write(config_path, contents).map_err(|e| {
            format!(
                "Failed to write config file '{}': {}",
                config_path.display(),
                e
            )
        })?;

        Ok(())
    }
}

/// Get the default config file path
///
/// - Config: ~/.local/share/single-voting/config.toml
pub fn default_config_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("single-voting")
        .join("config.toml")
}
