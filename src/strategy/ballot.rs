//! Per-proposal ballots.
//!
//! Ballots are append-only: created when the router hands a proposal over,
//! mutated by votes and finalization, never removed.

use super::error::{StrategyError, StrategyResult};
use crate::types::{Address, ProposalId, VoteChoice};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Result of finalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Pending,
    Passed,
    Failed,
}

/// Lifecycle position of a proposal at a given time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalStatus {
    /// Accepting votes.
    Open,
    /// Window elapsed, waiting for finalization.
    VotingClosed,
    /// Finalized; if passed, the time lock has not elapsed yet.
    Finalized(Outcome),
    /// Passed and time lock satisfied.
    Executable,
}

/// Tallies and voter record for a single proposal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalBallot {
    pub yes_votes: u64,
    pub no_votes: u64,
    pub abstain_votes: u64,

    /// Timestamp the router handed the proposal over.
    pub created_at: u64,

    /// created_at + voting period at creation time.
    pub deadline: u64,

    pub finalized_at: Option<u64>,
    pub outcome: Outcome,

    voters: BTreeSet<Address>,
}

impl ProposalBallot {
    pub fn new(created_at: u64, voting_period: u64) -> Self {
        Self {
            yes_votes: 0,
            no_votes: 0,
            abstain_votes: 0,
            created_at,
            deadline: created_at.saturating_add(voting_period),
            finalized_at: None,
            outcome: Outcome::Pending,
            voters: BTreeSet::new(),
        }
    }

    pub fn is_open(&self, now: u64) -> bool {
        now < self.deadline
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized_at.is_some()
    }

    pub fn has_voted(&self, voter: &Address) -> bool {
        self.voters.contains(voter)
    }

    pub fn voter_count(&self) -> u64 {
        self.voters.len() as u64
    }

    /// Status at `now`, given the strategy's time lock.
    pub fn status(&self, now: u64, time_lock_period: u64) -> ProposalStatus {
        match (self.finalized_at, self.outcome) {
            (Some(finalized_at), Outcome::Passed) => {
                if now >= finalized_at.saturating_add(time_lock_period) {
                    ProposalStatus::Executable
                } else {
                    ProposalStatus::Finalized(Outcome::Passed)
                }
            }
            (Some(_), outcome) => ProposalStatus::Finalized(outcome),
            (None, _) if self.is_open(now) => ProposalStatus::Open,
            (None, _) => ProposalStatus::VotingClosed,
        }
    }

    /// Record a vote. The caller has already checked membership and the
    /// voting window.
    pub fn record_vote(
        &mut self,
        voter: Address,
        choice: VoteChoice,
        weight: u64,
    ) -> StrategyResult<()> {
        if self.voters.contains(&voter) {
            return Err(StrategyError::AlreadyVoted);
        }
        self.voters.insert(voter);
        let bucket = match choice {
            VoteChoice::Against => &mut self.no_votes,
            VoteChoice::For => &mut self.yes_votes,
            VoteChoice::Abstain => &mut self.abstain_votes,
        };
        *bucket = bucket.saturating_add(weight);
        Ok(())
    }

    /// Close the ballot and compute the outcome against an absolute quorum.
    pub fn finalize(&mut self, now: u64, quorum_threshold: u64) -> StrategyResult<Outcome> {
        if self.is_finalized() {
            return Err(StrategyError::AlreadyFinalized);
        }
        if self.is_open(now) {
            return Err(StrategyError::TooEarly);
        }
        let outcome = if self.yes_votes >= quorum_threshold {
            Outcome::Passed
        } else {
            Outcome::Failed
        };
        self.finalized_at = Some(now);
        self.outcome = outcome;
        Ok(outcome)
    }
}

/// Ballots keyed by router-assigned proposal id.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallotStore {
    ballots: BTreeMap<ProposalId, ProposalBallot>,
}

impl BallotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a ballot. Ids are never reused.
    pub fn open(
        &mut self,
        proposal_id: ProposalId,
        created_at: u64,
        voting_period: u64,
    ) -> StrategyResult<&ProposalBallot> {
        if self.ballots.contains_key(&proposal_id) {
            return Err(StrategyError::ProposalExists(proposal_id));
        }
        Ok(self
            .ballots
            .entry(proposal_id)
            .or_insert_with(|| ProposalBallot::new(created_at, voting_period)))
    }

    pub fn get(&self, proposal_id: ProposalId) -> StrategyResult<&ProposalBallot> {
        self.ballots
            .get(&proposal_id)
            .ok_or(StrategyError::UnknownProposal(proposal_id))
    }

    pub fn get_mut(&mut self, proposal_id: ProposalId) -> StrategyResult<&mut ProposalBallot> {
        self.ballots
            .get_mut(&proposal_id)
            .ok_or(StrategyError::UnknownProposal(proposal_id))
    }

    pub fn len(&self) -> usize {
        self.ballots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ballots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ProposalId, &ProposalBallot)> {
        self.ballots.iter()
    }
}
