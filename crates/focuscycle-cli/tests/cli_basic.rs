//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    run_cli_env(args, &[])
}

/// Run a CLI command with extra environment variables.
fn run_cli_env(args: &[&str], envs: &[(&str, &str)]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "focuscycle-cli", "--"])
        .args(args)
        .envs(envs.iter().copied())
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_options_lists_candidates() {
    let (stdout, _, code) = run_cli(&["options"]);
    assert_eq!(code, 0, "options failed");
    assert!(stdout.contains("Start times:"));
    // 9 start candidates and 7 cycle candidates.
    assert!(stdout.contains("[8]"));
    assert!(stdout.contains("cycles (until "));
}

#[test]
fn test_config_show() {
    let (stdout, _, code) = run_cli(&["config", "show"]);
    assert_eq!(code, 0, "config show failed");
    assert!(stdout.contains("work_minutes"));
}

#[test]
fn test_config_path() {
    let (stdout, _, code) = run_cli(&["config", "path"]);
    assert_eq!(code, 0, "config path failed");
    assert!(stdout.contains("config.toml"));
}

#[test]
fn test_zero_cycle_start_completes_immediately() {
    let (stdout, _, code) = run_cli(&["start", "--cycles", "0"]);
    assert_eq!(code, 0, "start --cycles 0 failed");
    assert!(stdout.contains("0 cycles"));
    assert!(stdout.contains("Session log:"));
}

#[test]
fn test_pinned_now_fixes_the_schedule() {
    let (stdout, stderr, code) = run_cli_env(
        &["start", "--cycles", "0", "--now", "09:00"],
        &[("FOCUSCYCLE_LOG_STDERR", "1")],
    );
    assert_eq!(code, 0, "start --now failed");
    // The printed schedule is pinned, not wall-clock dependent.
    assert!(stdout.contains("0 cycles from 09:00 until 09:00"));
    // CLI-side diagnostics are emitted when stderr logging is enabled.
    assert!(stderr.contains("running focus session"));
}

#[test]
fn test_invalid_now_is_rejected() {
    let (_, stderr, code) = run_cli(&["start", "--cycles", "0", "--now", "soonish"]);
    assert_ne!(code, 0, "invalid --now should fail");
    assert!(stderr.contains("invalid --now value"));
}
