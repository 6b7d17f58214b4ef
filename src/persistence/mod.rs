//! Strategy state persistence.

pub mod state_file;

pub use state_file::{PersistenceError, StateFile, SUPPORTED_SCHEMA_VERSION};
