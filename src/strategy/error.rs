//! Strategy errors.
//!
//! Every error is a rejection of a single call; state is untouched when one
//! is returned.

use crate::serialization::SerializationError;
use crate::types::ProposalId;
use thiserror::Error;

/// Result type for strategy operations.
pub type StrategyResult<T> = Result<T, StrategyError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StrategyError {
    #[error("caller is not the admin")]
    Unauthorized,

    #[error("voter is not a member")]
    NotAMember,

    #[error("voter has already voted")]
    AlreadyVoted,

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("voting period has not passed yet")]
    TooEarly,

    #[error("proposal already finalized")]
    AlreadyFinalized,

    #[error("unknown proposal: {0}")]
    UnknownProposal(ProposalId),

    #[error("voting period has passed")]
    VotingClosed,

    #[error("proposal {0} already received")]
    ProposalExists(ProposalId),

    #[error("member count cannot drop below the configured minimum")]
    MemberFloor,

    #[error("strategy is not initialized")]
    NotInitialized,

    #[error("strategy is already initialized")]
    AlreadyInitialized,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid call data: {0}")]
    InvalidCall(String),
}

impl From<SerializationError> for StrategyError {
    fn from(e: SerializationError) -> Self {
        StrategyError::InvalidCall(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            StrategyError::NotAMember.to_string(),
            "voter is not a member"
        );
        assert_eq!(
            StrategyError::UnknownProposal(7).to_string(),
            "unknown proposal: 7"
        );
    }
}
