//! Router-facing strategy interface.
//!
//! The router never sees tallies or members; it opens ballots, asks for the
//! status of a proposal, and forwards executed calls addressed to the
//! strategy.

use super::ballot::ProposalStatus;
use super::error::StrategyResult;
use crate::types::{Address, CallContext, ProposalId};

pub trait VotingStrategy {
    /// Address the strategy is registered under.
    fn address(&self) -> Address;

    /// Open a ballot for a freshly submitted proposal. Router only.
    fn receive_proposal(
        &mut self,
        ctx: &CallContext,
        proposal_id: ProposalId,
        data: &[u8],
    ) -> StrategyResult<()>;

    /// Lifecycle position of a proposal at `now`.
    fn proposal_status(&self, proposal_id: ProposalId, now: u64) -> StrategyResult<ProposalStatus>;

    /// Passed and time lock satisfied.
    fn is_executable(&self, proposal_id: ProposalId, now: u64) -> bool {
        matches!(
            self.proposal_status(proposal_id, now),
            Ok(ProposalStatus::Executable)
        )
    }

    /// Apply encoded call data with the caller's authority.
    fn handle_call(&mut self, ctx: &CallContext, data: &[u8]) -> StrategyResult<()>;
}
