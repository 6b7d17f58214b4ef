//! Single voting strategy state machine.
//!
//! One member, one vote. A proposal is open for `voting_period` seconds
//! after the router hands it over, passes when its yes votes reach the
//! absolute `quorum_threshold`, and becomes executable `time_lock_period`
//! seconds after finalization.
//!
//! Each operation checks every precondition before touching state, so a
//! rejected call leaves tallies, flags, and the event log untouched.

use super::ballot::{BallotStore, Outcome, ProposalBallot, ProposalStatus};
use super::calls::StrategyCall;
use super::config::{InitParams, DOMAIN_VERSION};
use super::error::{StrategyError, StrategyResult};
use super::events::{EventKind, EventLog};
use super::membership::MembershipRegistry;
use super::traits::VotingStrategy;
use super::weight;
use crate::serialization::{from_cbor, to_cbor, SerializationError};
use crate::signature::{Domain, Secp256k1Verifier, SignatureVerifier, VoteMessage};
use crate::types::{Address, CallContext, ProposalId, VoteChoice};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Persistable strategy state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyState {
    /// Address the strategy lives at (typed-data verifying contract).
    pub address: Address,

    pub chain_id: u64,

    /// Set once by `set_up`.
    pub params: Option<InitParams>,

    pub registry: MembershipRegistry,

    pub ballots: BallotStore,

    #[serde(default)]
    pub events: EventLog,

    /// Schema version for evolution.
    pub schema_version: u64,
}

impl StrategyState {
    pub fn new(address: Address, chain_id: u64) -> Self {
        Self {
            address,
            chain_id,
            params: None,
            registry: MembershipRegistry::default(),
            ballots: BallotStore::new(),
            events: EventLog::new(),
            schema_version: 1,
        }
    }

    /// Serialize to CBOR bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SerializationError> {
        to_cbor(self)
    }

    /// Deserialize from CBOR bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SerializationError> {
        from_cbor(bytes)
    }
}

pub struct SingleVoting<V: SignatureVerifier = Secp256k1Verifier> {
    state: StrategyState,
    verifier: V,
}

impl SingleVoting<Secp256k1Verifier> {
    /// Deploy an uninitialized strategy; call `set_up` before use.
    pub fn deploy(address: Address, chain_id: u64) -> Self {
        Self::with_verifier(address, chain_id, Secp256k1Verifier)
    }

    /// Deploy and initialize in one step.
    pub fn new(address: Address, chain_id: u64, params: InitParams) -> StrategyResult<Self> {
        let mut strategy = Self::deploy(address, chain_id);
        strategy.set_up_params(params)?;
        Ok(strategy)
    }
}

impl<V: SignatureVerifier> SingleVoting<V> {
    pub fn with_verifier(address: Address, chain_id: u64, verifier: V) -> Self {
        Self {
            state: StrategyState::new(address, chain_id),
            verifier,
        }
    }

    /// Resume from a persisted snapshot.
    pub fn restore(state: StrategyState, verifier: V) -> Self {
        Self { state, verifier }
    }

    pub fn snapshot(&self) -> &StrategyState {
        &self.state
    }

    pub fn into_state(self) -> StrategyState {
        self.state
    }

    /// One-time initializer taking CBOR-encoded `InitParams`.
    pub fn set_up(&mut self, encoded_init_params: &[u8]) -> StrategyResult<()> {
        let params = InitParams::decode(encoded_init_params)
            .map_err(|e| StrategyError::InvalidConfig(e.to_string()))?;
        self.set_up_params(params)
    }

    pub fn set_up_params(&mut self, params: InitParams) -> StrategyResult<()> {
        if self.state.params.is_some() {
            return Err(StrategyError::AlreadyInitialized);
        }
        params.validate()?;

        info!(
            strategy = %self.state.address,
            admin = %params.admin,
            router = %params.router,
            voting_period = params.voting_period,
            quorum_threshold = params.quorum_threshold,
            time_lock_period = params.time_lock_period,
            "strategy initialized"
        );

        self.state.registry = MembershipRegistry::new(params.min_members);
        self.state.params = Some(params);
        Ok(())
    }

    fn params(&self) -> StrategyResult<&InitParams> {
        self.state.params.as_ref().ok_or(StrategyError::NotInitialized)
    }

    pub fn is_initialized(&self) -> bool {
        self.state.params.is_some()
    }

    // Configuration getters. An uninitialized strategy reads as zeroes.

    pub fn voting_period(&self) -> u64 {
        self.state.params.as_ref().map_or(0, |p| p.voting_period)
    }

    pub fn quorum_threshold(&self) -> u64 {
        self.state.params.as_ref().map_or(0, |p| p.quorum_threshold)
    }

    pub fn time_lock_period(&self) -> u64 {
        self.state.params.as_ref().map_or(0, |p| p.time_lock_period)
    }

    pub fn name(&self) -> &str {
        self.state.params.as_ref().map_or("", |p| p.name.as_str())
    }

    pub fn admin(&self) -> Address {
        self.state.params.as_ref().map_or(Address::ZERO, |p| p.admin)
    }

    pub fn router(&self) -> Address {
        self.state.params.as_ref().map_or(Address::ZERO, |p| p.router)
    }

    pub fn chain_id(&self) -> u64 {
        self.state.chain_id
    }

    /// Typed-data domain votes must be signed under.
    pub fn domain(&self) -> Domain {
        Domain::new(
            self.name(),
            DOMAIN_VERSION,
            self.state.chain_id,
            self.state.address,
        )
    }

    /// Admin-equivalent callers: the configured admin and the router.
    fn ensure_admin(&self, ctx: &CallContext) -> StrategyResult<()> {
        let params = self.params()?;
        if ctx.caller == params.admin || ctx.caller == params.router {
            Ok(())
        } else {
            warn!(caller = %ctx.caller, "rejected admin-only call");
            Err(StrategyError::Unauthorized)
        }
    }

    // ------------------------------------------------------------------
    // Membership
    // ------------------------------------------------------------------

    /// Returns false when `member` already belonged (no double count).
    pub fn add_member(&mut self, ctx: &CallContext, member: Address) -> StrategyResult<bool> {
        self.ensure_admin(ctx)?;

        let added = self.state.registry.add(member);
        if added {
            self.state
                .events
                .record(ctx.timestamp, ctx.caller, EventKind::MemberAdded { member });
            info!(member = %member, count = self.state.registry.count(), "member added");
        } else {
            debug!(member = %member, "member already present");
        }
        Ok(added)
    }

    /// Returns false when `member` was not a member.
    pub fn remove_member(&mut self, ctx: &CallContext, member: Address) -> StrategyResult<bool> {
        self.ensure_admin(ctx)?;

        let removed = self.state.registry.remove(&member)?;
        if removed {
            self.state
                .events
                .record(ctx.timestamp, ctx.caller, EventKind::MemberRemoved { member });
            info!(member = %member, count = self.state.registry.count(), "member removed");
        }
        Ok(removed)
    }

    pub fn transfer_admin(&mut self, ctx: &CallContext, new_admin: Address) -> StrategyResult<()> {
        self.ensure_admin(ctx)?;
        if new_admin.is_zero() {
            return Err(StrategyError::InvalidConfig(
                "admin must not be the zero address".to_string(),
            ));
        }

        let params = self
            .state
            .params
            .as_mut()
            .ok_or(StrategyError::NotInitialized)?;
        let previous = params.admin;
        params.admin = new_admin;

        self.state.events.record(
            ctx.timestamp,
            ctx.caller,
            EventKind::AdminTransferred {
                previous,
                new_admin,
            },
        );
        info!(previous = %previous, new_admin = %new_admin, "admin transferred");
        Ok(())
    }

    pub fn members(&self, address: &Address) -> bool {
        self.state.registry.is_member(address)
    }

    pub fn is_member(&self, address: &Address) -> bool {
        self.members(address)
    }

    pub fn member_count(&self) -> u64 {
        self.state.registry.count()
    }

    pub fn registry(&self) -> &MembershipRegistry {
        &self.state.registry
    }

    // ------------------------------------------------------------------
    // Voting
    // ------------------------------------------------------------------

    pub fn calculate_weight(&self, voter: &Address, proposal_id: ProposalId) -> StrategyResult<u64> {
        weight::calculate_weight(&self.state.registry, voter, proposal_id)
    }

    /// Vote as the caller.
    pub fn vote(
        &mut self,
        ctx: &CallContext,
        proposal_id: ProposalId,
        choice: VoteChoice,
    ) -> StrategyResult<()> {
        self.cast_vote(ctx, ctx.caller, proposal_id, choice)
    }

    /// Vote on behalf of whoever signed `(proposal_id, choice)` under this
    /// strategy's domain. Returns the recovered voter.
    pub fn vote_signature(
        &mut self,
        ctx: &CallContext,
        proposal_id: ProposalId,
        choice: VoteChoice,
        signature: &[u8],
    ) -> StrategyResult<Address> {
        self.params()?;
        let message = VoteMessage::new(proposal_id, choice);
        let voter = self
            .verifier
            .recover(&self.domain(), &message, signature)
            .map_err(|e| {
                warn!(proposal_id, error = %e, "signature recovery failed");
                StrategyError::InvalidSignature(e.to_string())
            })?;

        if !self.state.registry.is_member(&voter) {
            warn!(proposal_id, signer = %voter, "signature from non-member");
            return Err(StrategyError::InvalidSignature(
                "signer is not a member".to_string(),
            ));
        }

        self.cast_vote(ctx, voter, proposal_id, choice)?;
        Ok(voter)
    }

    fn cast_vote(
        &mut self,
        ctx: &CallContext,
        voter: Address,
        proposal_id: ProposalId,
        choice: VoteChoice,
    ) -> StrategyResult<()> {
        self.params()?;
        let weight = self.calculate_weight(&voter, proposal_id)?;

        let ballot = self.state.ballots.get_mut(proposal_id)?;
        if !ballot.is_open(ctx.timestamp) {
            return Err(StrategyError::VotingClosed);
        }
        ballot.record_vote(voter, choice, weight)?;

        self.state.events.record(
            ctx.timestamp,
            ctx.caller,
            EventKind::VoteCast {
                proposal_id,
                voter,
                choice,
                weight,
            },
        );
        info!(proposal_id, voter = %voter, choice = %choice, weight, "vote cast");
        Ok(())
    }

    pub fn has_voted(&self, proposal_id: ProposalId, voter: &Address) -> bool {
        self.state
            .ballots
            .get(proposal_id)
            .map(|ballot| ballot.has_voted(voter))
            .unwrap_or(false)
    }

    pub fn proposals(&self, proposal_id: ProposalId) -> StrategyResult<&ProposalBallot> {
        self.state.ballots.get(proposal_id)
    }

    // ------------------------------------------------------------------
    // Finalization
    // ------------------------------------------------------------------

    /// Close voting and record the outcome. Callable by anyone once the
    /// window has elapsed.
    pub fn finalize_strategy(
        &mut self,
        ctx: &CallContext,
        proposal_id: ProposalId,
    ) -> StrategyResult<Outcome> {
        let quorum_threshold = self.params()?.quorum_threshold;

        let ballot = self.state.ballots.get_mut(proposal_id)?;
        let outcome = ballot.finalize(ctx.timestamp, quorum_threshold)?;
        let yes_votes = ballot.yes_votes;

        self.state.events.record(
            ctx.timestamp,
            ctx.caller,
            EventKind::ProposalFinalized {
                proposal_id,
                outcome,
            },
        );
        info!(
            proposal_id,
            ?outcome,
            yes_votes,
            quorum_threshold,
            "proposal finalized"
        );
        Ok(outcome)
    }

    pub fn events(&self) -> &EventLog {
        &self.state.events
    }
}

impl<V: SignatureVerifier> VotingStrategy for SingleVoting<V> {
    fn address(&self) -> Address {
        self.state.address
    }

    fn receive_proposal(
        &mut self,
        ctx: &CallContext,
        proposal_id: ProposalId,
        _data: &[u8],
    ) -> StrategyResult<()> {
        let params = self.params()?;
        if ctx.caller != params.router {
            warn!(caller = %ctx.caller, proposal_id, "proposal from unknown router");
            return Err(StrategyError::Unauthorized);
        }
        let voting_period = params.voting_period;

        let deadline = self
            .state
            .ballots
            .open(proposal_id, ctx.timestamp, voting_period)?
            .deadline;

        self.state.events.record(
            ctx.timestamp,
            ctx.caller,
            EventKind::ProposalReceived {
                proposal_id,
                deadline,
            },
        );
        info!(proposal_id, deadline, "proposal received");
        Ok(())
    }

    fn proposal_status(&self, proposal_id: ProposalId, now: u64) -> StrategyResult<ProposalStatus> {
        let time_lock_period = self.params()?.time_lock_period;
        Ok(self
            .state
            .ballots
            .get(proposal_id)?
            .status(now, time_lock_period))
    }

    fn handle_call(&mut self, ctx: &CallContext, data: &[u8]) -> StrategyResult<()> {
        match StrategyCall::decode(data)? {
            StrategyCall::AddMember { member } => self.add_member(ctx, member).map(|_| ()),
            StrategyCall::RemoveMember { member } => self.remove_member(ctx, member).map(|_| ()),
            StrategyCall::TransferAdmin { new_admin } => self.transfer_admin(ctx, new_admin),
        }
    }
}
