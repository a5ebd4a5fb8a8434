//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against the dev settings
//! directory and verify outputs.

use std::process::Command;

/// Run a CLI command and return (exit code, stdout, stderr).
fn run_cli(args: &[&str]) -> (i32, String, String) {
    let output = Command::new("cargo")
        .args(["run", "-p", "tubelock-cli", "--"])
        .args(args)
        .env("TUBELOCK_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

#[test]
fn test_status() {
    let (code, stdout, _) = run_cli(&["status"]);
    assert_eq!(code, 0, "status failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("status is JSON");
    assert!(parsed.get("blocked").is_some());
    assert!(parsed.get("countdown").is_some());
}

#[test]
fn test_config_list() {
    let (code, stdout, _) = run_cli(&["config", "list"]);
    assert_eq!(code, 0, "config list failed");
    assert!(stdout.contains("extensionEnabled"));
}

#[test]
fn test_config_get_unknown_key_fails() {
    let (code, _, stderr) = run_cli(&["config", "get", "noSuchKey"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown key"));
}

#[test]
fn test_block_zero_minutes_rejected() {
    let (code, _, stderr) = run_cli(&["block", "start", "--minutes", "0"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("at least one minute"));
}

#[test]
fn test_schedule_show() {
    let (code, stdout, _) = run_cli(&["schedule", "show"]);
    assert_eq!(code, 0, "schedule show failed");
    assert!(stdout.contains("scheduleBlockStart"));
}

#[test]
fn test_schedule_set_rejects_malformed_window() {
    let (code, _, stderr) = run_cli(&["schedule", "set", "--start", "9am", "--end", "17:00"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("not a valid"));
}

// The commands below all rewrite the shared dev settings file, so they
// run as one sequential flow rather than parallel test functions.
#[test]
fn test_settings_write_flow() {
    let (code, _, _) = run_cli(&["config", "set", "extensionEnabled", "true"]);
    assert_eq!(code, 0, "config set failed");

    let (code, stdout, _) = run_cli(&["config", "get", "extensionEnabled"]);
    assert_eq!(code, 0, "config get failed");
    assert_eq!(stdout.trim(), "true");

    let (code, stdout, _) = run_cli(&["block", "start", "--minutes", "5"]);
    assert_eq!(code, 0, "block start failed");
    assert!(stdout.contains("tempBlockUntil"));

    let (code, stdout, _) = run_cli(&["block", "cancel"]);
    assert_eq!(code, 0, "block cancel failed");
    assert!(stdout.contains("cancelled"));

    let (code, stdout, _) = run_cli(&["block", "remaining"]);
    assert_eq!(code, 0, "block remaining failed");
    assert_eq!(stdout.trim(), "00:00");

    let (code, _, _) = run_cli(&["schedule", "set", "--start", "22:00", "--end", "06:00"]);
    assert_eq!(code, 0, "schedule set failed");

    let (code, _, _) = run_cli(&["schedule", "disable"]);
    assert_eq!(code, 0, "schedule disable failed");

    let (_, stdout, _) = run_cli(&["schedule", "show"]);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["scheduleBlockEnabled"], false);
    assert_eq!(parsed["scheduleBlockStart"], "22:00");
}

#[test]
fn test_watch_bounded_ticks_exits() {
    let (code, _, _) = run_cli(&["watch", "--ticks", "2"]);
    assert_eq!(code, 0, "bounded watch failed");
}
