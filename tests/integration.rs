//! Integration tests for the heresy engine binary.
//!
//! Tests the full protocol session flow by spawning the engine process,
//! sending commands via stdin, and verifying stdout responses.

use std::io::{BufRead, Write};
use std::process::{Command, Stdio};

use serde_json::Value;

/// Sends a sequence of commands to the engine and collects stdout lines.
fn run_engine(commands: &[&str]) -> Vec<String> {
    let exe = env!("CARGO_BIN_EXE_heresy");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to start heresy");

    let mut stdin = child.stdin.take().unwrap();
    let stdout = child.stdout.take().unwrap();
    let reader = std::io::BufReader::new(stdout);

    for cmd in commands {
        writeln!(stdin, "{}", cmd).unwrap();
    }
    stdin.flush().unwrap();
    drop(stdin);

    let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
    let status = child.wait().expect("failed to wait on child");
    assert!(status.success());
    lines
}

fn json_lines(lines: &[String]) -> Vec<Value> {
    lines
        .iter()
        .map(|l| serde_json::from_str(l).expect("every response line is JSON"))
        .collect()
}

#[test]
fn isready_replies_readyok() {
    let lines = run_engine(&["isready", "quit"]);
    assert_eq!(lines, vec!["readyok".to_string()]);
}

#[test]
fn newgame_snapshot_has_fresh_state() {
    let lines = run_engine(&["newgame", "quit"]);
    let out = json_lines(&lines);
    assert_eq!(out.len(), 1);
    let snap = &out[0];
    assert_eq!(snap["phase"], "PlayerTurn");
    assert_eq!(snap["turnScore"], 0);
    assert_eq!(snap["currentPlayerIndex"], 0);
    assert_eq!(snap["dice"].as_array().unwrap().len(), 6);
    for p in snap["players"].as_array().unwrap() {
        assert_eq!(p["score"], 0);
        assert_eq!(p["isOnBoard"], false);
    }
}

#[test]
fn commands_before_newgame_are_rejected() {
    let lines = run_engine(&["roll", "bank", "quit"]);
    let out = json_lines(&lines);
    assert_eq!(out.len(), 2);
    assert!(out.iter().all(|v| v.get("error").is_some()));
}

#[test]
fn seeded_games_are_reproducible() {
    let cmds = [
        "setoption name Seed value 1234",
        "newgame",
        "roll",
        "state",
        "quit",
    ];
    assert_eq!(run_engine(&cmds), run_engine(&cmds));
}

#[test]
fn roll_then_keep_flow() {
    let lines = run_engine(&[
        "setoption name Seed value 99",
        "setoption name AutoOpponent value false",
        "newgame",
        "roll",
        "quit",
    ]);
    let out = json_lines(&lines);
    let rolled = &out[1];
    let dice = rolled["dice"].as_array().unwrap();
    assert!(dice.iter().all(|d| (1..=6).contains(&d["value"].as_u64().unwrap())));
    assert_eq!(rolled["lastRoll"].as_array().unwrap().len(), 6);
    assert_eq!(rolled["events"][0]["kind"], "roll");

    // Either the roll forfeited and the opponent holds the dice, or some die
    // is scoring and the human is choosing.
    if rolled["phase"] == "PlayerTurn" {
        assert_eq!(rolled["step"], "AwaitingSelection");
        assert!(dice.iter().any(|d| d["isScoring"] == true));
    } else {
        assert_eq!(rolled["phase"], "OpponentTurn");
        assert_eq!(rolled["turnScore"], 0);
    }
}

#[test]
fn invalid_select_is_ignored() {
    let lines = run_engine(&["newgame", "select banana", "select 42", "quit"]);
    let out = json_lines(&lines);
    // "select banana" does not parse; "select 42" is rejected by the session.
    assert_eq!(out.len(), 2);
    assert_eq!(out[1]["error"], "No die with id 42.");
}

#[test]
fn unknown_commands_are_skipped() {
    let lines = run_engine(&["foobar", "", "isready", "quit"]);
    assert_eq!(lines, vec!["readyok".to_string()]);
}

#[test]
fn log_command_lists_entries() {
    let lines = run_engine(&["newgame", "log", "quit"]);
    let out = json_lines(&lines);
    let log = out[1]["log"].as_array().unwrap();
    assert_eq!(log[0]["kind"], "newGame");
    assert_eq!(log[1]["kind"], "turnStart");
}
