use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod config;
pub mod init_config;
pub mod init_state;
pub mod inspect;
pub mod version;

#[derive(Parser)]
#[command(name = "single-voting")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Operator CLI for a membership-gated voting strategy", long_about = None)]
pub struct Cli {
    /// Path to config file (default: ~/.local/share/single-voting/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default configuration file
    InitConfig {
        /// Where to write the file (defaults to --config or the default path)
        #[arg(long)]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Create a fresh strategy snapshot from the configuration
    InitState {
        /// Snapshot file to create
        #[arg(long)]
        state: PathBuf,

        /// Overwrite an existing snapshot
        #[arg(long)]
        force: bool,
    },

    /// Print members, configuration and tallies of a snapshot as JSON
    Inspect {
        /// Snapshot file to read
        #[arg(long)]
        state: PathBuf,

        /// Only show this proposal
        #[arg(long)]
        proposal: Option<u64>,
    },

    /// Display version information
    Version,
}

impl Cli {
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(config::default_config_path)
    }
}

pub fn execute(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = cli.config_path();
    match cli.command {
        Commands::InitConfig { path, force } => {
            init_config::execute(path.or(cli.config), force)
        }
        Commands::InitState { state, force } => init_state::execute(&config_path, state, force),
        Commands::Inspect { state, proposal } => inspect::execute(state, proposal),
        Commands::Version => {
            version::execute();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_init_config() {
        let cli = Cli::parse_from(["single-voting", "init-config"]);

        match cli.command {
            Commands::InitConfig { path, force } => {
                assert_eq!(path, None);
                assert!(!force);
            }
            _ => panic!("Expected InitConfig command"),
        }
    }

    #[test]
    fn test_cli_parse_init_config_with_path() {
        let cli = Cli::parse_from([
            "single-voting",
            "init-config",
            "--path",
            "/tmp/config.toml",
            "--force",
        ]);

        match cli.command {
            Commands::InitConfig { path, force } => {
                assert_eq!(path, Some(PathBuf::from("/tmp/config.toml")));
                assert!(force);
            }
            _ => panic!("Expected InitConfig command"),
        }
    }

    #[test]
    fn test_cli_parse_inspect() {
        let cli = Cli::parse_from([
            "single-voting",
            "inspect",
            "--state",
            "/tmp/state.cbor",
            "--proposal",
            "3",
        ]);

        match cli.command {
            Commands::Inspect { state, proposal } => {
                assert_eq!(state, PathBuf::from("/tmp/state.cbor"));
                assert_eq!(proposal, Some(3));
            }
            _ => panic!("Expected Inspect command"),
        }
    }

    #[test]
    fn test_cli_parse_global_config() {
        let cli = Cli::parse_from([
            "single-voting",
            "init-state",
            "--state",
            "/tmp/state.cbor",
            "--config",
            "/etc/single-voting/config.toml",
        ]);

        assert_eq!(
            cli.config_path(),
            PathBuf::from("/etc/single-voting/config.toml")
        );
        assert!(matches!(cli.command, Commands::InitState { force: false, .. }));
    }

    #[test]
    fn test_cli_parse_version() {
        let cli = Cli::parse_from(["single-voting", "version"]);
        assert!(matches!(cli.command, Commands::Version));
    }

    #[test]
    fn test_inspect_requires_state() {
        assert!(Cli::try_parse_from(["single-voting", "inspect"]).is_err());
    }
}
