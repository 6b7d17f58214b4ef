//! Proposal router.
//!
//! This module provides the governance side strategies plug into:
//! - Strategy registry controlled by the avatar
//! - Proposals as ordered transaction hashes
//! - Index-by-index execution through the avatar or into a strategy
//! - Mock-friendly `Avatar` abstraction for testing

pub mod error;
pub mod mock;
pub mod module;
pub mod traits;

pub use error::{RouterError, RouterResult};
pub use mock::{MockSafe, SafeCall};
pub use module::{ProposalModule, ProposalRecord};
pub use traits::{Avatar, RouterState};
