//! File-backed strategy snapshots.
//!
//! Snapshots are CBOR-encoded `StrategyState`. Writes go to a sibling
//! temporary file first and are renamed into place, so a crash mid-write
//! leaves the previous snapshot intact.

use crate::serialization::SerializationError;
use crate::strategy::StrategyState;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Highest snapshot schema this build reads.
pub const SUPPORTED_SCHEMA_VERSION: u64 = 1;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("snapshot encoding error: {0}")]
    Serialization(#[from] SerializationError),

    #[error("unsupported snapshot schema version {0}")]
    UnsupportedSchema(u64),
}

#[derive(Debug, Clone)]
pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    fn io_error(&self, source: io::Error) -> PersistenceError {
        PersistenceError::Io {
            path: self.path.clone(),
            source,
        }
    }

    /// Atomically replace the snapshot on disk.
    pub fn save(&self, state: &StrategyState) -> Result<(), PersistenceError> {
        let bytes = state.to_bytes()?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }

        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, &bytes).map_err(|e| self.io_error(e))?;
        fs::rename(&temp_path, &self.path).map_err(|e| self.io_error(e))?;

        info!(
            path = %self.path.display(),
            bytes = bytes.len(),
            ballots = state.ballots.len(),
            "snapshot saved"
        );
        Ok(())
    }

    pub fn load(&self) -> Result<StrategyState, PersistenceError> {
        let bytes = fs::read(&self.path).map_err(|e| self.io_error(e))?;
        let state = StrategyState::from_bytes(&bytes)?;
        if state.schema_version > SUPPORTED_SCHEMA_VERSION {
            return Err(PersistenceError::UnsupportedSchema(state.schema_version));
        }

        debug!(path = %self.path.display(), "snapshot loaded");
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{InitParams, SingleVoting, VotingStrategy};
    use crate::types::{Address, CallContext, VoteChoice};
    use tempfile::TempDir;

    const ADMIN: Address = Address::new([0x01; 20]);
    const ROUTER: Address = Address::new([0x02; 20]);

    fn populated() -> SingleVoting {
        let params = InitParams {
            admin: ADMIN,
            router: ROUTER,
            voting_period: 60,
            quorum_threshold: 1,
            time_lock_period: 0,
            name: "Snapshot".to_string(),
            min_members: 0,
        };
        let mut strategy = SingleVoting::new(Address::new([0xaa; 20]), 5, params).unwrap();
        let voter = Address::new([0x10; 20]);
        strategy.add_member(&CallContext::new(ADMIN, 0), voter).unwrap();
        strategy
            .receive_proposal(&CallContext::new(ROUTER, 0), 0, &[])
            .unwrap();
        strategy
            .vote(&CallContext::new(voter, 1), 0, VoteChoice::For)
            .unwrap();
        strategy
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let file = StateFile::new(temp_dir.path().join("nested").join("state.cbor"));
        let strategy = populated();

        file.save(strategy.snapshot()).unwrap();
        assert!(file.exists());
        assert!(!file.path().with_extension("tmp").exists());

        let loaded = file.load().unwrap();
        assert_eq!(&loaded, strategy.snapshot());
    }

    #[test]
    fn test_save_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let file = StateFile::new(temp_dir.path().join("state.cbor"));
        let mut strategy = populated();
        file.save(strategy.snapshot()).unwrap();

        strategy
            .add_member(&CallContext::new(ADMIN, 2), Address::new([0x11; 20]))
            .unwrap();
        file.save(strategy.snapshot()).unwrap();

        assert_eq!(file.load().unwrap().registry.count(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = StateFile::new(temp_dir.path().join("absent.cbor"));
        assert!(matches!(file.load(), Err(PersistenceError::Io { .. })));
    }

    #[test]
    fn test_load_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("state.cbor");
        fs::write(&path, b"definitely not cbor").unwrap();
        assert!(matches!(
            StateFile::new(path).load(),
            Err(PersistenceError::Serialization(_))
        ));
    }

    #[test]
    fn test_newer_schema_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let file = StateFile::new(temp_dir.path().join("state.cbor"));
        let mut state = populated().into_state();
        state.schema_version = SUPPORTED_SCHEMA_VERSION + 1;
        file.save(&state).unwrap();

        assert!(matches!(
            file.load(),
            Err(PersistenceError::UnsupportedSchema(2))
        ));
    }
}
