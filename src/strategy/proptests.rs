//! Property-based tests for the single voting strategy
//!
//! Tests for:
//! - Tally: yes/no/abstain sums equal the number of distinct voters
//! - Double voting: a second ballot never changes tallies
//! - Membership: adding the same member repeatedly counts once
//! - Outcome: Passed iff yes votes reach the quorum threshold

use super::ballot::Outcome;
use super::config::InitParams;
use super::single_voting::SingleVoting;
use super::traits::VotingStrategy;
use crate::types::{Address, CallContext, VoteChoice};
use proptest::prelude::*;

const STRATEGY: Address = Address::new([0xaa; 20]);
const ADMIN: Address = Address::new([0x01; 20]);
const ROUTER: Address = Address::new([0x02; 20]);
const VOTING_PERIOD: u64 = 100;

fn voter(index: u8) -> Address {
    let mut bytes = [0x40; 20];
    bytes[19] = index;
    Address::new(bytes)
}

fn choice_strategy() -> impl Strategy<Value = VoteChoice> {
    prop_oneof![
        Just(VoteChoice::Against),
        Just(VoteChoice::For),
        Just(VoteChoice::Abstain),
    ]
}

fn strategy_with_members(members: u8, quorum_threshold: u64) -> SingleVoting {
    let params = InitParams {
        admin: ADMIN,
        router: ROUTER,
        voting_period: VOTING_PERIOD,
        quorum_threshold,
        time_lock_period: 10,
        name: "Prop".to_string(),
        min_members: 0,
    };
    let mut strategy = SingleVoting::new(STRATEGY, 1, params).unwrap();
    for index in 0..members {
        strategy
            .add_member(&CallContext::new(ADMIN, 0), voter(index))
            .unwrap();
    }
    strategy
        .receive_proposal(&CallContext::new(ROUTER, 0), 0, &[])
        .unwrap();
    strategy
}

proptest! {
    /// Property: every accepted vote lands in exactly one tally
    #[test]
    fn tallies_sum_to_voter_count(
        choices in prop::collection::vec(choice_strategy(), 1..30),
    ) {
        let mut strategy = strategy_with_members(choices.len() as u8, 1);
        for (index, choice) in choices.iter().enumerate() {
            let ctx = CallContext::new(voter(index as u8), 1);
            strategy.vote(&ctx, 0, *choice).unwrap();
        }

        let ballot = strategy.proposals(0).unwrap();
        prop_assert_eq!(
            ballot.yes_votes + ballot.no_votes + ballot.abstain_votes,
            choices.len() as u64
        );
        prop_assert_eq!(ballot.voter_count(), choices.len() as u64);
    }

    /// Property: repeat votes are rejected without touching tallies
    #[test]
    fn second_vote_never_counts(
        first in choice_strategy(),
        second in choice_strategy(),
    ) {
        let mut strategy = strategy_with_members(1, 1);
        let ctx = CallContext::new(voter(0), 1);
        strategy.vote(&ctx, 0, first).unwrap();
        let before = strategy.proposals(0).unwrap().clone();

        prop_assert!(strategy.vote(&ctx, 0, second).is_err());
        prop_assert_eq!(strategy.proposals(0).unwrap(), &before);
    }

    /// Property: member count equals the number of distinct additions
    #[test]
    fn repeated_adds_count_once(
        indices in prop::collection::vec(0u8..8, 0..40),
    ) {
        let mut strategy = strategy_with_members(0, 1);
        for index in &indices {
            strategy
                .add_member(&CallContext::new(ADMIN, 1), voter(*index))
                .unwrap();
        }

        let distinct: std::collections::BTreeSet<_> = indices.iter().collect();
        prop_assert_eq!(strategy.member_count(), distinct.len() as u64);
    }

    /// Property: outcome depends only on yes votes against the threshold
    #[test]
    fn outcome_follows_quorum(
        yes in 0u8..10,
        no in 0u8..10,
        quorum_threshold in 1u64..12,
    ) {
        let mut strategy = strategy_with_members(yes + no, quorum_threshold);
        for index in 0..yes {
            strategy
                .vote(&CallContext::new(voter(index), 1), 0, VoteChoice::For)
                .unwrap();
        }
        for index in yes..yes + no {
            strategy
                .vote(&CallContext::new(voter(index), 1), 0, VoteChoice::Against)
                .unwrap();
        }

        let outcome = strategy
            .finalize_strategy(&CallContext::new(ADMIN, VOTING_PERIOD), 0)
            .unwrap();
        let expected = if u64::from(yes) >= quorum_threshold {
            Outcome::Passed
        } else {
            Outcome::Failed
        };
        prop_assert_eq!(outcome, expected);
    }
}
