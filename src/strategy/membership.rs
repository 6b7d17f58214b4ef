//! Membership registry.
//!
//! Set-based: an address is either in the set or not, and the count is the
//! set's cardinality. Authorization happens in the state machine; the
//! registry only enforces its own invariants.

use super::error::{StrategyError, StrategyResult};
use crate::types::Address;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipRegistry {
    /// Active members.
    members: BTreeSet<Address>,

    /// Removal is rejected once the count reaches this floor.
    #[serde(default)]
    min_members: u64,
}

impl MembershipRegistry {
    pub fn new(min_members: u64) -> Self {
        Self {
            members: BTreeSet::new(),
            min_members,
        }
    }

    /// Add a member. Returns false if already present (count unchanged).
    pub fn add(&mut self, member: Address) -> bool {
        self.members.insert(member)
    }

    /// Remove a member. Returns false if not a member.
    ///
    /// Fails with `MemberFloor` when removal would take the count below the
    /// configured minimum.
    pub fn remove(&mut self, member: &Address) -> StrategyResult<bool> {
        if !self.members.contains(member) {
            return Ok(false);
        }
        if self.count() <= self.min_members {
            return Err(StrategyError::MemberFloor);
        }
        Ok(self.members.remove(member))
    }

    pub fn is_member(&self, address: &Address) -> bool {
        self.members.contains(address)
    }

    pub fn count(&self) -> u64 {
        self.members.len() as u64
    }

    pub fn min_members(&self) -> u64 {
        self.min_members
    }

    pub fn iter(&self) -> impl Iterator<Item = &Address> {
        self.members.iter()
    }
}
