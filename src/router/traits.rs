//! Router-side seams and the proposal state enumeration.

use crate::types::{Address, Operation};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Proposal lifecycle as observed by the router.
///
/// Discriminants are part of the external interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum RouterState {
    Active = 0,
    Canceled = 1,
    TimeLocked = 2,
    Executed = 3,
    Executing = 4,
    Uninitialized = 5,
    Failed = 6,
}

impl RouterState {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for RouterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Active => "active",
            Self::Canceled => "canceled",
            Self::TimeLocked => "time_locked",
            Self::Executed => "executed",
            Self::Executing => "executing",
            Self::Uninitialized => "uninitialized",
            Self::Failed => "failed",
        };
        write!(f, "{}", label)
    }
}

/// The treasury account the router executes transactions through.
///
/// Enables mock implementations for testing.
pub trait Avatar {
    /// Address of the avatar. Only it may configure the router.
    fn address(&self) -> Address;

    /// Execute a transaction on behalf of the enabled module.
    fn exec_transaction_from_module(
        &mut self,
        to: Address,
        value: u128,
        data: &[u8],
        operation: Operation,
    ) -> Result<(), String>;
}
