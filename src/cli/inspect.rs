//! Print a strategy snapshot as JSON.

use serde_json::{json, Value};
use single_voting::persistence::StateFile;
use single_voting::strategy::{ProposalBallot, StrategyState};
use single_voting::types::ProposalId;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn ballot_json(
    proposal_id: ProposalId,
    ballot: &ProposalBallot,
    now: u64,
    time_lock_period: u64,
) -> Value {
    json!({
        "id": proposal_id,
        "status": format!("{:?}", ballot.status(now, time_lock_period)),
        "yes_votes": ballot.yes_votes,
        "no_votes": ballot.no_votes,
        "abstain_votes": ballot.abstain_votes,
        "voters": ballot.voter_count(),
        "created_at": ballot.created_at,
        "deadline": ballot.deadline,
        "finalized_at": ballot.finalized_at,
        "outcome": format!("{:?}", ballot.outcome),
    })
}

/// Render a snapshot. With `proposal_id`, only that ballot is rendered.
pub fn render(
    state: &StrategyState,
    proposal_id: Option<ProposalId>,
    now: u64,
) -> Result<Value, Box<dyn std::error::Error>> {
    let time_lock_period = state
        .params
        .as_ref()
        .map_or(0, |params| params.time_lock_period);

    if let Some(id) = proposal_id {
        let ballot = state.ballots.get(id)?;
        return Ok(ballot_json(id, ballot, now, time_lock_period));
    }

    let config = state.params.as_ref().map(|params| {
        json!({
            "name": params.name,
            "admin": params.admin.to_string(),
            "router": params.router.to_string(),
            "voting_period": params.voting_period,
            "quorum_threshold": params.quorum_threshold,
            "time_lock_period": params.time_lock_period,
            "min_members": params.min_members,
        })
    });
    let members: Vec<String> = state.registry.iter().map(|m| m.to_string()).collect();
    let proposals: Vec<Value> = state
        .ballots
        .iter()
        .map(|(id, ballot)| ballot_json(*id, ballot, now, time_lock_period))
        .collect();

    Ok(json!({
        "address": state.address.to_string(),
        "chain_id": state.chain_id,
        "initialized": config.is_some(),
        "config": config,
        "member_count": state.registry.count(),
        "members": members,
        "proposals": proposals,
        "events": state.events.len(),
    }))
}

pub fn execute(
    state_path: PathBuf,
    proposal_id: Option<ProposalId>,
) -> Result<(), Box<dyn std::error::Error>> {
    let state = StateFile::new(state_path).load()?;
    let output = render(&state, proposal_id, unix_now())?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
