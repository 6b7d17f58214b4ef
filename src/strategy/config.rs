//! Strategy initialization parameters.
//!
//! Passed once to `SingleVoting::set_up`, CBOR-encoded the same way the
//! router hands call data around.

use super::error::{StrategyError, StrategyResult};
use crate::serialization::{from_cbor, to_cbor, SerializationError};
use crate::types::Address;
use serde::{Deserialize, Serialize};

/// Typed-data domain version.
pub const DOMAIN_VERSION: &str = "1";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitParams {
    /// Controlling identity (usually the multisig avatar).
    pub admin: Address,

    /// Proposal router allowed to open ballots and to act with admin rights.
    pub router: Address,

    /// Voting window in seconds.
    pub voting_period: u64,

    /// Absolute yes-vote count required to pass.
    pub quorum_threshold: u64,

    /// Seconds between finalization and execution eligibility.
    pub time_lock_period: u64,

    /// Human-readable name, also the typed-data domain name.
    pub name: String,

    /// Membership floor.
    #[serde(default)]
    pub min_members: u64,
}

impl InitParams {
    pub fn encode(&self) -> Result<Vec<u8>, SerializationError> {
        to_cbor(self)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, SerializationError> {
        from_cbor(bytes)
    }

    pub fn validate(&self) -> StrategyResult<()> {
        if self.admin.is_zero() {
            return Err(StrategyError::InvalidConfig(
                "admin must not be the zero address".to_string(),
            ));
        }
        if self.router.is_zero() {
            return Err(StrategyError::InvalidConfig(
                "router must not be the zero address".to_string(),
            ));
        }
        if self.voting_period == 0 {
            return Err(StrategyError::InvalidConfig(
                "voting_period must be positive".to_string(),
            ));
        }
        if self.quorum_threshold == 0 {
            return Err(StrategyError::InvalidConfig(
                "quorum_threshold must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> InitParams {
        InitParams {
            admin: Address::new([1; 20]),
            router: Address::new([2; 20]),
            voting_period: 60,
            quorum_threshold: 2,
            time_lock_period: 60,
            name: "Test".to_string(),
            min_members: 0,
        }
    }

    #[test]
    fn test_encode_decode() {
        let encoded = params().encode().unwrap();
        assert_eq!(InitParams::decode(&encoded).unwrap(), params());
    }

    #[test]
    fn test_validate_ok() {
        assert!(params().validate().is_ok());
    }

    #[test]
    fn test_validate_zero_quorum() {
        let p = InitParams {
            quorum_threshold: 0,
            ..params()
        };
        assert!(matches!(p.validate(), Err(StrategyError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_zero_admin() {
        let p = InitParams {
            admin: Address::ZERO,
            ..params()
        };
        assert!(matches!(p.validate(), Err(StrategyError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_zero_voting_period() {
        let p = InitParams {
            voting_period: 0,
            ..params()
        };
        assert!(matches!(p.validate(), Err(StrategyError::InvalidConfig(_))));
    }
}
