//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against the dev data directory
//! and verify outputs.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "wellspring-cli", "--"])
        .args(args)
        .env("WELLSPRING_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_timer_status() {
    let (stdout, _, code) = run_cli(&["timer", "status"]);
    assert_eq!(code, 0, "Timer status failed");
    assert!(stdout.contains("\"type\""));
}

#[test]
fn test_timer_reset() {
    let (_, _, code) = run_cli(&["timer", "reset"]);
    assert_eq!(code, 0, "Timer reset failed");
}

#[test]
fn test_timer_rejects_unknown_mode() {
    let (_, stderr, code) = run_cli(&["timer", "start", "--mode", "yoga"]);
    assert!(code != 0, "Unknown mode unexpectedly accepted");
    assert!(stderr.contains("unknown mode"));
}

#[test]
fn test_workout_generate() {
    let (stdout, _, code) = run_cli(&["workout", "generate", "--body-part", "legs", "--equipment", "none"]);
    assert_eq!(code, 0, "Workout generate failed");
    assert!(stdout.contains("1."));
}

#[test]
fn test_workout_status() {
    let (_, _, code) = run_cli(&["workout", "status"]);
    assert_eq!(code, 0, "Workout status failed");
}

#[test]
fn test_config_show() {
    let (stdout, _, code) = run_cli(&["config", "show"]);
    assert_eq!(code, 0, "Config show failed");
    assert!(stdout.contains("[timer]"));
}

#[test]
fn test_config_get() {
    let (stdout, _, code) = run_cli(&["config", "get", "timer.work_minutes"]);
    assert_eq!(code, 0, "Config get failed");
    assert!(stdout.trim().chars().all(|c| c.is_ascii_digit()));
}

#[test]
fn test_config_get_unknown_key_fails() {
    let (_, _, code) = run_cli(&["config", "get", "timer.nope"]);
    assert!(code != 0, "Unknown config key unexpectedly succeeded");
}

#[test]
fn test_stats_show() {
    let (stdout, _, code) = run_cli(&["stats", "show"]);
    assert_eq!(code, 0, "Stats show failed");
    assert!(stdout.contains("sessions_completed"));
}
