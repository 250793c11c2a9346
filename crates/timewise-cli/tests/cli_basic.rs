//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against a temporary data directory and
//! verify outputs.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (exit code, stdout, stderr).
fn run_cli(data_dir: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_timewise"))
        .args(args)
        .env("TIMEWISE_DATA_DIR", data_dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn run_ok(data_dir: &Path, args: &[&str]) -> String {
    let (code, stdout, stderr) = run_cli(data_dir, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    stdout
}

fn events_json(data_dir: &Path) -> Vec<serde_json::Value> {
    let out = run_ok(data_dir, &["event", "list", "--json"]);
    serde_json::from_str(&out).expect("event list prints JSON")
}

fn id_of(data_dir: &Path, title: &str) -> String {
    events_json(data_dir)
        .iter()
        .find(|e| e["title"] == title)
        .and_then(|e| e["id"].as_str())
        .map(str::to_string)
        .unwrap_or_else(|| panic!("no event titled {title}"))
}

#[test]
fn test_first_run_seeds_sample_event() {
    let dir = tempfile::tempdir().unwrap();
    let events = events_json(dir.path());
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["title"], "Welcome sample study block");
    assert!(dir.path().join("state.json").exists());
}

#[test]
fn test_prompt_adds_to_today() {
    let dir = tempfile::tempdir().unwrap();
    run_ok(dir.path(), &["start-at", "06:00"]);
    let out = run_ok(dir.path(), &["prompt", "add", "read", "for", "30m", "today"]);
    assert!(out.contains("added 1"), "unexpected output: {out}");

    let today: Vec<serde_json::Value> =
        serde_json::from_str(&run_ok(dir.path(), &["today", "--json"])).unwrap();
    let read = today.iter().find(|e| e["title"] == "read").unwrap();
    let start = read["start"].as_str().unwrap();
    assert!(start.contains("T06:") || start.contains("T07:"), "start was {start}");
}

#[test]
fn test_prompt_json_output() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_ok(dir.path(), &["prompt", "--json", "delete welcome"]);
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["operations"][0]["type"], "deleteByTitle");
    assert_eq!(value["summary"]["deleted"], 1);
    assert!(events_json(dir.path()).is_empty());
}

#[test]
fn test_event_edits() {
    let dir = tempfile::tempdir().unwrap();
    let id = id_of(dir.path(), "Welcome sample study block");

    assert_eq!(run_ok(dir.path(), &["event", "rename", &id, "Deep", "work"]).trim(), "Renamed");
    assert_eq!(run_ok(dir.path(), &["event", "pin", &id, "--at", "14:30"]).trim(), "Pinned time set");
    assert_eq!(run_ok(dir.path(), &["event", "duration", &id, "-15"]).trim(), "Duration updated");
    assert_eq!(run_ok(dir.path(), &["event", "done", &id]).trim(), "Marked as done");

    let events = events_json(dir.path());
    assert_eq!(events[0]["title"], "Deep work");
    assert_eq!(events[0]["pinned"], true);
    assert_eq!(events[0]["status"], "done");
    assert!(events[0]["start"].as_str().unwrap().ends_with("T14:30:00"));
    assert!(events[0]["end"].as_str().unwrap().ends_with("T15:15:00"));

    assert_eq!(run_ok(dir.path(), &["event", "status", &id, "in-progress"]).trim(), "Status updated");
    assert_eq!(run_ok(dir.path(), &["event", "unpin", &id]).trim(), "Pin updated");
    assert_eq!(run_ok(dir.path(), &["event", "delete", &id]).trim(), "Deleted");
    assert!(events_json(dir.path()).is_empty());
}

#[test]
fn test_unknown_event_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["event", "done", "evt_missing"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"), "stderr was {stderr}");
}

#[test]
fn test_settings_are_clamped() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_ok(dir.path(), &["settings", "set", "dayEndHour", "40"]);
    assert_eq!(out.trim(), "dayEndHour = 23");
    assert_eq!(run_ok(dir.path(), &["settings", "get", "dayEndHour"]).trim(), "23");

    run_ok(dir.path(), &["settings", "set", "bufferMinutes", "abc"]);
    assert_eq!(run_ok(dir.path(), &["settings", "get", "bufferMinutes"]).trim(), "0");

    run_ok(dir.path(), &["settings", "reset"]);
    let list = run_ok(dir.path(), &["settings", "list"]);
    assert!(list.contains("bufferMinutes = 5"));

    let (code, _, _) = run_cli(dir.path(), &["settings", "set", "colour", "red"]);
    assert_eq!(code, 1);
}

#[test]
fn test_export_import_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    run_ok(dir.path(), &["prompt", "add yoga at 7am for 30m on 2030-01-05"]);
    let export = dir.path().join("backup.json");
    run_ok(dir.path(), &["export", "--output", export.to_str().unwrap()]);

    let other = tempfile::tempdir().unwrap();
    let out = run_ok(other.path(), &["import", export.to_str().unwrap()]);
    assert_eq!(out.trim(), "imported 2 events");
    assert!(events_json(other.path()).iter().any(|e| e["title"] == "yoga"));

    let bad = dir.path().join("bad.json");
    std::fs::write(&bad, r#"{"events": []}"#).unwrap();
    let (code, _, stderr) = run_cli(other.path(), &["import", bad.to_str().unwrap()]);
    assert_eq!(code, 1);
    assert!(stderr.contains("settings"), "stderr was {stderr}");
    assert_eq!(events_json(other.path()).len(), 2);
}

#[test]
fn test_import_recovers_corrupt_state() {
    let dir = tempfile::tempdir().unwrap();
    run_ok(dir.path(), &["prompt", "add yoga at 7am for 30m on 2030-01-05"]);
    let export = dir.path().join("backup.json");
    run_ok(dir.path(), &["export", "--output", export.to_str().unwrap()]);

    let broken = tempfile::tempdir().unwrap();
    std::fs::write(broken.path().join("state.json"), "{ not json").unwrap();
    let (code, _, _) = run_cli(broken.path(), &["event", "list", "--json"]);
    assert_eq!(code, 1);

    let out = run_ok(broken.path(), &["import", export.to_str().unwrap()]);
    assert_eq!(out.trim(), "imported 2 events");
    assert!(events_json(broken.path()).iter().any(|e| e["title"] == "yoga"));
}

#[test]
fn test_prompt_without_changes() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_ok(dir.path(), &["prompt", "delete", "zzz"]);
    assert!(out.contains("nothing changed"), "unexpected output: {out}");
    assert_eq!(events_json(dir.path()).len(), 1);
}

#[test]
fn test_start_at_is_persisted_in_config() {
    let dir = tempfile::tempdir().unwrap();
    run_ok(dir.path(), &["start-at", "8:15am"]);
    assert_eq!(run_ok(dir.path(), &["config", "get", "sequencer.start_at"]).trim(), "08:15");

    run_ok(dir.path(), &["start-at", "clear"]);
    assert_eq!(run_ok(dir.path(), &["config", "get", "sequencer.start_at"]).trim(), "");

    let (code, _, _) = run_cli(dir.path(), &["start-at", "25:00"]);
    assert_eq!(code, 1);
}

#[test]
fn test_config_commands() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(run_ok(dir.path(), &["config", "get", "logging.level"]).trim(), "warn");
    run_ok(dir.path(), &["config", "set", "logging.level", "error"]);
    assert!(run_ok(dir.path(), &["config", "list"]).contains("logging.level = \"error\""));
    run_ok(dir.path(), &["config", "reset"]);
    assert_eq!(run_ok(dir.path(), &["config", "get", "logging.level"]).trim(), "warn");

    let (code, _, _) = run_cli(dir.path(), &["config", "get", "nope"]);
    assert_eq!(code, 1);
}

#[test]
fn test_reminders_json() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_ok(dir.path(), &["reminders", "--json"]);
    let reminders: Vec<serde_json::Value> = serde_json::from_str(&out).unwrap();
    for reminder in reminders {
        assert!(reminder.get("fireAt").is_some());
        assert!(reminder.get("eventId").is_some());
    }
}
