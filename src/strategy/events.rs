//! Strategy event log.
//!
//! - Append-only, never pruned
//! - Chronological by call timestamp, ties broken by sequence number
//! - Queryable by kind, actor, and time

use crate::types::{Address, ProposalId, VoteChoice};
use serde::{Deserialize, Serialize};

use super::ballot::Outcome;

/// What happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    MemberAdded {
        member: Address,
    },
    MemberRemoved {
        member: Address,
    },
    ProposalReceived {
        proposal_id: ProposalId,
        deadline: u64,
    },
    VoteCast {
        proposal_id: ProposalId,
        voter: Address,
        choice: VoteChoice,
        weight: u64,
    },
    ProposalFinalized {
        proposal_id: ProposalId,
        outcome: Outcome,
    },
    AdminTransferred {
        previous: Address,
        new_admin: Address,
    },
}

impl EventKind {
    /// Short label, used for filtering and display.
    pub fn label(&self) -> &'static str {
        match self {
            Self::MemberAdded { .. } => "member_added",
            Self::MemberRemoved { .. } => "member_removed",
            Self::ProposalReceived { .. } => "proposal_received",
            Self::VoteCast { .. } => "vote_cast",
            Self::ProposalFinalized { .. } => "proposal_finalized",
            Self::AdminTransferred { .. } => "admin_transferred",
        }
    }
}

/// Single log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyEvent {
    pub seq: u64,
    pub timestamp: u64,
    /// Caller of the operation that produced the event.
    pub actor: Address,
    pub kind: EventKind,
}

/// Append-only event log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    entries: Vec<StrategyEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, timestamp: u64, actor: Address, kind: EventKind) {
        let seq = self.entries.len() as u64;
        self.entries.push(StrategyEvent {
            seq,
            timestamp,
            actor,
            kind,
        });
    }

    pub fn entries(&self) -> &[StrategyEvent] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn query(&self, query: &EventQuery) -> Vec<StrategyEvent> {
        query_events(&self.entries, query)
    }
}

/// Query options for the event log.
#[derive(Debug, Clone)]
pub struct EventQuery {
    /// Filter by `EventKind::label`.
    pub kind: Option<&'static str>,
    pub actor: Option<Address>,
    /// Limit number of results (most recent first).
    pub limit: Option<usize>,
    /// Only entries strictly after this timestamp.
    pub after_timestamp: Option<u64>,
}

impl Default for EventQuery {
    fn default() -> Self {
        Self {
            kind: None,
            actor: None,
            limit: Some(50),
            after_timestamp: None,
        }
    }
}

/// Query events with filters, most recent first.
pub fn query_events(entries: &[StrategyEvent], query: &EventQuery) -> Vec<StrategyEvent> {
    let mut filtered: Vec<StrategyEvent> = entries
        .iter()
        .filter(|entry| {
            if let Some(kind) = query.kind {
                if entry.kind.label() != kind {
                    return false;
                }
            }

            if let Some(ref actor) = query.actor {
                if &entry.actor != actor {
                    return false;
                }
            }

            if let Some(after_ts) = query.after_timestamp {
                if entry.timestamp <= after_ts {
                    return false;
                }
            }

            true
        })
        .cloned()
        .collect();

    filtered.sort_by(|a, b| (b.timestamp, b.seq).cmp(&(a.timestamp, a.seq)));

    if let Some(limit) = query.limit {
        filtered.truncate(limit);
    }

    filtered
}
