//! Single Voting - membership-gated voting strategy for a proposal router
//!
//! One member, one vote. Members are managed by a controlling identity (or
//! through executed proposals), ballots close after a fixed voting window,
//! proposals pass on an absolute yes-vote quorum and become executable once
//! a time lock elapses.
//!
//! Key principles:
//! - Time is an input (`CallContext`), never read inside the state machine
//! - Every rejected operation leaves state untouched
//! - Ballots are append-only
//! - Off-chain votes are bound to strategy address and chain id

pub mod persistence;
pub mod router;
pub mod serialization;
pub mod signature;
pub mod strategy;
pub mod types;
