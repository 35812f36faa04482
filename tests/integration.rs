//! Integration tests for the element-duel driver binary.
//!
//! Tests the full protocol session flow by spawning the engine process,
//! sending commands via stdin, and verifying stdout responses.

use std::io::Write;
use std::process::{Command, Stdio};

/// Pipes `script` into a fresh engine process, one command per line, and
/// returns what it printed once stdin closes.
fn drive(script: &[&str]) -> Vec<String> {
    let mut input = script.join("\n");
    input.push('\n');

    let mut child = Command::new(env!("CARGO_BIN_EXE_element-duel"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn element-duel");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_bytes())
        .expect("write script");

    let output = child.wait_with_output().expect("collect engine output");
    assert!(output.status.success(), "engine exited with {}", output.status);
    String::from_utf8(output.stdout)
        .expect("engine output is UTF-8")
        .lines()
        .map(str::to_owned)
        .collect()
}

const START: [&str; 4] = ["setoption name Seed value 7", "newmatch", "select 5 2 3", "confirm"];

fn session(extra: &[&str]) -> Vec<String> {
    let mut commands: Vec<&str> = START.to_vec();
    commands.extend_from_slice(extra);
    commands.push("quit");
    drive(&commands)
}

#[test]
fn new_match_opens_selection() {
    let lines = drive(&["newmatch", "quit"]);
    assert_eq!(lines, vec![r#"event {"type":"selection_opened"}"#, "ok"]);
}

#[test]
fn select_starts_match_and_rolls() {
    let lines = drive(&["setoption name Seed value 7", "newmatch", "select 5 2 3", "quit"]);
    let started = lines
        .iter()
        .find(|l| l.contains(r#""type":"match_started""#))
        .expect("match_started event");
    assert!(started.contains(r#""player":["p_diluc","p_paimon","p_nefer"]"#));
    assert!(lines.iter().any(|l| l.contains(r#""type":"dice_rolled""#)));
    assert_eq!(lines.iter().filter(|l| *l == "ok").count(), 2);
}

#[test]
fn confirm_enters_action_phase() {
    let lines = session(&["state"]);
    let state_line = lines.iter().find(|l| l.starts_with("state ")).expect("state line");
    let json: serde_json::Value = serde_json::from_str(&state_line["state ".len()..]).unwrap();
    assert_eq!(json["phase"], "Action");
    assert_eq!(json["turn"], "Player");
    assert_eq!(json["enemy"]["dice"].as_array().unwrap().len(), 8);
}

#[test]
fn burst_without_energy_is_rejected() {
    let lines = session(&["skill dlk_3"]);
    assert_eq!(lines.last().map(String::as_str), Some("rejected insufficient energy"));
}

#[test]
fn switch_reports_event_then_ok() {
    let lines = session(&["switch p_paimon"]);
    let switched = r#"event {"type":"switched","side":"Player","to":"p_paimon","forced":false}"#;
    let idx = lines.iter().position(|l| l == switched).expect("switched event");
    assert!(lines[idx..].iter().any(|l| l == "ok"));
}

#[test]
fn actions_before_match_are_rejected() {
    let lines = drive(&["confirm", "newmatch", "select 0 0 1", "quit"]);
    assert_eq!(lines[0], "rejected wrong phase");
    assert_eq!(lines.last().map(String::as_str), Some("rejected invalid selection"));
}

#[test]
fn list_prints_roster() {
    let lines = drive(&["list", "quit"]);
    assert_eq!(lines.len(), 10);
    assert_eq!(lines[0], "character 0 moziqin Qiqi cryo 12");
    assert_eq!(lines[8], "character 8 raiden Raiden electro 10");
    assert_eq!(lines[9], "ok");
}

#[test]
fn unknown_commands_are_ignored() {
    let lines = drive(&["dance", "select", "state", "quit"]);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("state {"));
}

#[test]
fn bad_roster_path_is_rejected() {
    let lines = drive(&["roster /definitely/missing.json", "list", "quit"]);
    assert!(lines[0].starts_with("rejected failed to read /definitely/missing.json"));
    assert_eq!(lines.len(), 11);
}

#[test]
fn autopilot_finishes_a_match() {
    let mut commands: Vec<&str> = START.to_vec();
    for _ in 0..300 {
        commands.push("auto");
        commands.push("confirm");
    }
    commands.push("state");
    commands.push("quit");
    let lines = drive(&commands);

    assert!(lines.iter().any(|l| l.contains(r#""type":"match_ended""#)));
    let state_line = lines.last().unwrap();
    let json: serde_json::Value = serde_json::from_str(&state_line["state ".len()..]).unwrap();
    assert_eq!(json["phase"], "GameOver");
}

#[test]
fn quit_stops_processing() {
    let lines = drive(&["quit", "newmatch"]);
    assert!(lines.is_empty());
}
