use super::traits::RouterState;
use crate::strategy::StrategyError;
use crate::types::{Address, ProposalId};
use thiserror::Error;

pub type RouterResult<T> = Result<T, RouterError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    #[error("caller is not the avatar")]
    Unauthorized,

    #[error("voting strategy {0} not enabled")]
    StrategyNotEnabled(Address),

    #[error("voting strategy {0} already enabled")]
    StrategyAlreadyEnabled(Address),

    #[error("unknown proposal: {0}")]
    UnknownProposal(ProposalId),

    #[error("proposal is not in execution state: {state}")]
    NotExecutable { state: RouterState },

    #[error("transaction hash does not match indexed hash")]
    TransactionHashMismatch,

    #[error("transaction index {index} is not next (expected {expected})")]
    InvalidTransactionIndex { index: usize, expected: usize },

    #[error("proposal cannot be canceled: {state}")]
    CannotCancel { state: RouterState },

    #[error("proposal carries no transactions")]
    EmptyProposal,

    #[error("strategy call failed: {0}")]
    Strategy(#[from] StrategyError),

    #[error("avatar call failed: {0}")]
    Avatar(String),
}
