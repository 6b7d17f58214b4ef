//! In-memory proposal router.
//!
//! Holds enabled voting strategies and the avatar, records proposals as
//! lists of transaction hashes, and executes them one index at a time once
//! their strategy reports them executable.

use super::error::{RouterError, RouterResult};
use super::traits::{Avatar, RouterState};
use crate::signature::typed_data::transaction_hash;
use crate::strategy::{Outcome, ProposalStatus, StrategyError, VotingStrategy};
use crate::types::{Address, CallContext, Operation, ProposalId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// A submitted proposal as the router tracks it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalRecord {
    pub proposer: Address,
    pub strategy: Address,
    pub tx_hashes: Vec<[u8; 32]>,
    /// Number of transactions executed so far.
    pub execution_counter: usize,
    pub canceled: bool,
}

impl ProposalRecord {
    fn is_fully_executed(&self) -> bool {
        self.execution_counter == self.tx_hashes.len()
    }
}

struct StrategyEntry<S> {
    strategy: S,
    enabled: bool,
}

pub struct ProposalModule<S: VotingStrategy, A: Avatar> {
    address: Address,
    chain_id: u64,
    avatar: A,
    strategies: BTreeMap<Address, StrategyEntry<S>>,
    proposals: Vec<ProposalRecord>,
}

impl<S: VotingStrategy, A: Avatar> ProposalModule<S, A> {
    pub fn new(address: Address, chain_id: u64, avatar: A) -> Self {
        Self {
            address,
            chain_id,
            avatar,
            strategies: BTreeMap::new(),
            proposals: Vec::new(),
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn avatar(&self) -> &A {
        &self.avatar
    }

    fn ensure_avatar(&self, ctx: &CallContext) -> RouterResult<()> {
        if ctx.caller == self.avatar.address() {
            Ok(())
        } else {
            warn!(caller = %ctx.caller, "rejected avatar-only call");
            Err(RouterError::Unauthorized)
        }
    }

    // ------------------------------------------------------------------
    // Strategy registry
    // ------------------------------------------------------------------

    /// Register and enable a strategy. Re-enabling a disabled address keeps
    /// the registered instance and drops `strategy`.
    pub fn enable_strategy(&mut self, ctx: &CallContext, strategy: S) -> RouterResult<()> {
        self.ensure_avatar(ctx)?;
        let address = strategy.address();

        match self.strategies.get_mut(&address) {
            Some(entry) if entry.enabled => {
                return Err(RouterError::StrategyAlreadyEnabled(address));
            }
            Some(entry) => {
                debug!(strategy = %address, "re-enabling registered strategy");
                entry.enabled = true;
            }
            None => {
                self.strategies.insert(
                    address,
                    StrategyEntry {
                        strategy,
                        enabled: true,
                    },
                );
            }
        }

        info!(strategy = %address, "strategy enabled");
        Ok(())
    }

    /// Stop accepting new proposals for `address`. Existing proposals keep
    /// resolving through it.
    pub fn disable_strategy(&mut self, ctx: &CallContext, address: Address) -> RouterResult<()> {
        self.ensure_avatar(ctx)?;
        match self.strategies.get_mut(&address) {
            Some(entry) if entry.enabled => {
                entry.enabled = false;
                info!(strategy = %address, "strategy disabled");
                Ok(())
            }
            _ => Err(RouterError::StrategyNotEnabled(address)),
        }
    }

    pub fn is_strategy_enabled(&self, address: &Address) -> bool {
        self.strategies
            .get(address)
            .map(|entry| entry.enabled)
            .unwrap_or(false)
    }

    /// Registered strategy, enabled or not.
    pub fn strategy(&self, address: &Address) -> Option<&S> {
        self.strategies.get(address).map(|entry| &entry.strategy)
    }

    /// Mutable access for callers interacting with the strategy directly
    /// (voting, finalizing, admin calls).
    pub fn strategy_mut(&mut self, address: &Address) -> Option<&mut S> {
        self.strategies
            .get_mut(address)
            .map(|entry| &mut entry.strategy)
    }

    // ------------------------------------------------------------------
    // Proposals
    // ------------------------------------------------------------------

    /// Hash binding one transaction to this router and chain.
    pub fn get_transaction_hash(
        &self,
        to: Address,
        value: u128,
        data: &[u8],
        operation: Operation,
        nonce: u64,
    ) -> [u8; 32] {
        transaction_hash(self.chain_id, self.address, to, value, data, operation, nonce)
    }

    /// Record a proposal and open its ballot on `strategy`. Ids are
    /// sequential from zero.
    pub fn submit_proposal(
        &mut self,
        ctx: &CallContext,
        tx_hashes: Vec<[u8; 32]>,
        strategy: Address,
        data: &[u8],
    ) -> RouterResult<ProposalId> {
        if !self.is_strategy_enabled(&strategy) {
            return Err(RouterError::StrategyNotEnabled(strategy));
        }
        if tx_hashes.is_empty() {
            return Err(RouterError::EmptyProposal);
        }

        let proposal_id = self.proposals.len() as ProposalId;
        let router_ctx = CallContext::new(self.address, ctx.timestamp);
        self.strategy_mut(&strategy)
            .ok_or(RouterError::StrategyNotEnabled(strategy))?
            .receive_proposal(&router_ctx, proposal_id, data)?;

        self.proposals.push(ProposalRecord {
            proposer: ctx.caller,
            strategy,
            tx_hashes,
            execution_counter: 0,
            canceled: false,
        });

        info!(
            proposal_id,
            proposer = %ctx.caller,
            strategy = %strategy,
            "proposal submitted"
        );
        Ok(proposal_id)
    }

    pub fn proposal(&self, proposal_id: ProposalId) -> Option<&ProposalRecord> {
        usize::try_from(proposal_id)
            .ok()
            .and_then(|index| self.proposals.get(index))
    }

    pub fn proposal_count(&self) -> usize {
        self.proposals.len()
    }

    /// Lifecycle position of a proposal at `now`.
    pub fn state(&self, proposal_id: ProposalId, now: u64) -> RouterState {
        let Some(proposal) = self.proposal(proposal_id) else {
            return RouterState::Uninitialized;
        };
        if proposal.canceled {
            return RouterState::Canceled;
        }
        if proposal.is_fully_executed() {
            return RouterState::Executed;
        }

        let status = self
            .strategy(&proposal.strategy)
            .map(|strategy| strategy.proposal_status(proposal_id, now));
        match status {
            Some(Ok(ProposalStatus::Open))
            | Some(Ok(ProposalStatus::VotingClosed))
            | Some(Ok(ProposalStatus::Finalized(Outcome::Pending))) => RouterState::Active,
            Some(Ok(ProposalStatus::Finalized(Outcome::Passed))) => RouterState::TimeLocked,
            Some(Ok(ProposalStatus::Finalized(Outcome::Failed))) => RouterState::Failed,
            Some(Ok(ProposalStatus::Executable)) => RouterState::Executing,
            Some(Err(_)) | None => RouterState::Uninitialized,
        }
    }

    /// Execute the next transaction of an executable proposal.
    ///
    /// `tx_index` must equal the number of transactions already executed and
    /// the supplied transaction must hash to the recorded hash at that index.
    /// Transactions addressed to a registered strategy are applied to it
    /// with the router as caller; everything else goes through the avatar.
    #[allow(clippy::too_many_arguments)]
    pub fn execute_proposal_by_index(
        &mut self,
        ctx: &CallContext,
        proposal_id: ProposalId,
        target: Address,
        value: u128,
        data: &[u8],
        operation: Operation,
        tx_index: usize,
    ) -> RouterResult<()> {
        let proposal = self
            .proposal(proposal_id)
            .ok_or(RouterError::UnknownProposal(proposal_id))?;

        let state = self.state(proposal_id, ctx.timestamp);
        if state != RouterState::Executing {
            return Err(RouterError::NotExecutable { state });
        }
        if tx_index != proposal.execution_counter {
            return Err(RouterError::InvalidTransactionIndex {
                index: tx_index,
                expected: proposal.execution_counter,
            });
        }
        let expected = self.get_transaction_hash(target, value, data, operation, tx_index as u64);
        if proposal.tx_hashes.get(tx_index) != Some(&expected) {
            return Err(RouterError::TransactionHashMismatch);
        }

        let index = proposal_id as usize;
        self.proposals[index].execution_counter += 1;

        if let Err(e) = self.dispatch(ctx.timestamp, target, value, data, operation) {
            self.proposals[index].execution_counter -= 1;
            warn!(proposal_id, tx_index, error = %e, "transaction failed");
            return Err(e);
        }

        info!(proposal_id, tx_index, target = %target, "transaction executed");
        Ok(())
    }

    fn dispatch(
        &mut self,
        timestamp: u64,
        target: Address,
        value: u128,
        data: &[u8],
        operation: Operation,
    ) -> RouterResult<()> {
        let router_ctx = CallContext::new(self.address, timestamp);
        match self.strategies.get_mut(&target) {
            Some(entry) => {
                if value != 0 || operation != Operation::Call {
                    return Err(RouterError::Strategy(StrategyError::InvalidCall(
                        "strategy calls carry no value and no delegation".to_string(),
                    )));
                }
                entry.strategy.handle_call(&router_ctx, data)?;
            }
            None => {
                self.avatar
                    .exec_transaction_from_module(target, value, data, operation)
                    .map_err(RouterError::Avatar)?;
            }
        }
        Ok(())
    }

    /// Cancel proposals that have not been executed. Avatar only; all ids
    /// are checked before any is canceled.
    pub fn cancel_proposals(
        &mut self,
        ctx: &CallContext,
        proposal_ids: &[ProposalId],
    ) -> RouterResult<()> {
        self.ensure_avatar(ctx)?;

        for &proposal_id in proposal_ids {
            if self.proposal(proposal_id).is_none() {
                return Err(RouterError::UnknownProposal(proposal_id));
            }
            let state = self.state(proposal_id, ctx.timestamp);
            if matches!(state, RouterState::Canceled | RouterState::Executed) {
                return Err(RouterError::CannotCancel { state });
            }
        }

        for &proposal_id in proposal_ids {
            self.proposals[proposal_id as usize].canceled = true;
            info!(proposal_id, "proposal canceled");
        }
        Ok(())
    }
}
