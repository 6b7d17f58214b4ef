//! Voting weight: one member, one vote.

use super::error::{StrategyError, StrategyResult};
use super::membership::MembershipRegistry;
use crate::types::{Address, ProposalId};

/// Weight of a current member.
pub const MEMBER_WEIGHT: u64 = 1;

/// Weight of `voter` on `proposal_id`, evaluated against current membership.
///
/// The proposal id does not influence the result; there is no snapshotting.
pub fn calculate_weight(
    registry: &MembershipRegistry,
    voter: &Address,
    _proposal_id: ProposalId,
) -> StrategyResult<u64> {
    if registry.is_member(voter) {
        Ok(MEMBER_WEIGHT)
    } else {
        Err(StrategyError::NotAMember)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_weight_is_one() {
        let mut registry = MembershipRegistry::default();
        let voter = Address::new([1; 20]);
        registry.add(voter);
        assert_eq!(calculate_weight(&registry, &voter, 0), Ok(1));
        assert_eq!(calculate_weight(&registry, &voter, 99), Ok(1));
    }

    #[test]
    fn test_non_member_rejected() {
        let registry = MembershipRegistry::default();
        let voter = Address::new([1; 20]);
        assert_eq!(
            calculate_weight(&registry, &voter, 0),
            Err(StrategyError::NotAMember)
        );
    }
}
