//! Membership-gated voting strategy.
//!
//! This module provides the strategy half of proposal governance:
//! - Membership registry managed by an admin (or the router)
//! - Per-proposal ballots with a fixed voting window
//! - Direct and signature-relayed votes
//! - Absolute-quorum finalization with a post-finalization time lock

pub mod ballot;
pub mod calls;
pub mod config;
pub mod error;
pub mod events;
pub mod membership;
pub mod single_voting;
pub mod traits;
pub mod weight;

#[cfg(test)]
mod proptests;

pub use ballot::{BallotStore, Outcome, ProposalBallot, ProposalStatus};
pub use calls::StrategyCall;
pub use config::{InitParams, DOMAIN_VERSION};
pub use error::{StrategyError, StrategyResult};
pub use events::{EventKind, EventLog, EventQuery, StrategyEvent};
pub use membership::MembershipRegistry;
pub use single_voting::{SingleVoting, StrategyState};
pub use traits::VotingStrategy;
pub use weight::{calculate_weight, MEMBER_WEIGHT};
