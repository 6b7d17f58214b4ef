// Integration tests for CLI commands
// These tests run the built binary against temporary config and snapshot
// files.

use single_voting::persistence::StateFile;
use single_voting::strategy::{InitParams, SingleVoting, VotingStrategy};
use single_voting::types::{Address, CallContext, VoteChoice};
use std::process::{Command, Output};
use tempfile::TempDir;

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_single-voting"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command")
}

fn write_snapshot(dir: &TempDir) -> std::path::PathBuf {
    let admin = Address::new([1; 20]);
    let router = Address::new([2; 20]);
    let voter = Address::new([3; 20]);
    let params = InitParams {
        admin,
        router,
        voting_period: 60,
        quorum_threshold: 1,
        time_lock_period: 0,
        name: "Cli".to_string(),
        min_members: 0,
    };
    let mut strategy = SingleVoting::new(Address::new([0xaa; 20]), 7, params).unwrap();
    strategy.add_member(&CallContext::new(admin, 0), voter).unwrap();
    strategy
        .receive_proposal(&CallContext::new(router, 0), 0, &[])
        .unwrap();
    strategy
        .vote(&CallContext::new(voter, 1), 0, VoteChoice::For)
        .unwrap();

    let path = dir.path().join("state.cbor");
    StateFile::new(&path).save(strategy.snapshot()).unwrap();
    path
}

#[test]
fn test_cli_help() {
    let output = run(&["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Operator CLI"));
    assert!(stdout.contains("init-config"));
    assert!(stdout.contains("init-state"));
    assert!(stdout.contains("inspect"));
    assert!(stdout.contains("version"));
}

#[test]
fn test_cli_version() {
    let output = run(&["version"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("single-voting"));
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_inspect_requires_state() {
    let output = run(&["inspect"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--state") || stderr.contains("required"));
}

#[test]
fn test_cli_init_config_then_init_state() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    let state_path = temp_dir.path().join("state.cbor");
    let config = config_path.to_str().unwrap();
    let state = state_path.to_str().unwrap();

    let output = run(&["init-config", "--path", config]);
    assert!(output.status.success());
    assert!(config_path.exists());

    // Refuses to clobber without --force
    assert!(!run(&["init-config", "--path", config]).status.success());

    let output = run(&["--config", config, "init-state", "--state", state]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let loaded = StateFile::new(&state_path).load().unwrap();
    assert_eq!(loaded.params.unwrap().name, "Single Voting");
}

#[test]
fn test_cli_init_state_with_bad_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, "[strategy]\nname = 3\n").unwrap();
    let state_path = temp_dir.path().join("state.cbor");

    let output = run(&[
        "--config",
        config_path.to_str().unwrap(),
        "init-state",
        "--state",
        state_path.to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error"));
    assert!(!state_path.exists());
}

#[test]
fn test_cli_inspect_snapshot() {
    let temp_dir = TempDir::new().unwrap();
    let state_path = write_snapshot(&temp_dir);

    let output = run(&["inspect", "--state", state_path.to_str().unwrap()]);
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["chain_id"], 7);
    assert_eq!(json["member_count"], 1);
    assert_eq!(json["config"]["name"], "Cli");
    assert_eq!(json["proposals"][0]["yes_votes"], 1);
}

#[test]
fn test_cli_inspect_single_proposal() {
    let temp_dir = TempDir::new().unwrap();
    let state_path = write_snapshot(&temp_dir);

    let output = run(&[
        "inspect",
        "--state",
        state_path.to_str().unwrap(),
        "--proposal",
        "0",
    ]);
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["id"], 0);
    assert_eq!(json["voters"], 1);

    let output = run(&[
        "inspect",
        "--state",
        state_path.to_str().unwrap(),
        "--proposal",
        "4",
    ]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown proposal"));
}

#[test]
fn test_cli_inspect_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("absent.cbor");
    let output = run(&["inspect", "--state", path.to_str().unwrap()]);
    assert!(!output.status.success());
}
