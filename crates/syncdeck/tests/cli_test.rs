//! Integration tests for the `syncdeck` CLI binary.
//!
//! Argument parsing, help output, completions, and exit codes are checked
//! without a daemon; the envelope tests run against a wiremock stand-in.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use wiremock::matchers::{any, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DEVICE_A: &str = "AAAAAAA-AAAAAAA-AAAAAAA-AAAAAAA-AAAAAAA-AAAAAAA-AAAAAAA-AAAAAAA";

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `syncdeck` binary with env isolation.
///
/// Clears all `SYNCDECK_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn syncdeck_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("syncdeck");
    cmd.env("HOME", "/tmp/syncdeck-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/syncdeck-cli-test-nonexistent")
        .env_remove("SYNCDECK_PROFILE")
        .env_remove("SYNCDECK_DAEMON")
        .env_remove("SYNCDECK_API_KEY")
        .env_remove("SYNCDECK_OUTPUT")
        .env_remove("SYNCDECK_INSECURE")
        .env_remove("SYNCDECK_TIMEOUT")
        .env_remove("SYNCTHING_API_KEY");
    cmd
}

/// A command already pointed at `daemon` with an API key.
fn against(daemon: &str) -> assert_cmd::Command {
    let mut cmd = syncdeck_cmd();
    cmd.args(["--daemon", daemon, "--api-key", "test-key"]);
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

/// Run a prepared command off the async runtime so the mock server keeps serving.
async fn run(mut cmd: assert_cmd::Command) -> std::process::Output {
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = syncdeck_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    syncdeck_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("Syncthing")
            .and(predicate::str::contains("devices"))
            .and(predicate::str::contains("folders"))
            .and(predicate::str::contains("system")),
    );
}

#[test]
fn test_version_flag() {
    syncdeck_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("syncdeck"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    syncdeck_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    syncdeck_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = syncdeck_cmd().arg("foobar").output().unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_devices_list_without_config_or_daemon() {
    syncdeck_cmd()
        .args(["devices", "list"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("config").or(predicate::str::contains("Configuration")));
}

#[test]
fn test_config_show_no_config() {
    syncdeck_cmd().args(["config", "show"]).assert().success();
}

#[test]
fn test_invalid_output_format() {
    let output = syncdeck_cmd()
        .args(["--output", "invalid", "devices", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("possible values"),
        "Expected error about valid output formats:\n{text}"
    );
}

#[test]
fn test_unsupported_daemon_scheme() {
    syncdeck_cmd()
        .args(["--daemon", "ftp://nas", "--api-key", "k", "devices", "list"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_malformed_bulk_file_is_a_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("devices.txt");
    std::fs::write(&file, format!("{DEVICE_A},laptop,docs,extra\n")).unwrap();

    // Port 9 is never contacted: the file is rejected first.
    let output = against("http://127.0.0.1:9")
        .args(["devices", "bulk"])
        .arg(&file)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("line 1"));
}

#[test]
fn test_remove_without_yes_in_non_interactive_mode() {
    against("http://127.0.0.1:9")
        .args(["folders", "remove", "docs"])
        .write_stdin("")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--yes"));
}

// ── Subcommand help discovery ───────────────────────────────────────

#[test]
fn test_devices_subcommands_exist() {
    syncdeck_cmd()
        .args(["devices", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("list")
                .and(predicate::str::contains("add"))
                .and(predicate::str::contains("update"))
                .and(predicate::str::contains("remove"))
                .and(predicate::str::contains("bulk")),
        );
}

#[test]
fn test_folders_subcommands_exist() {
    syncdeck_cmd()
        .args(["folders", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("pause")
                .and(predicate::str::contains("resume"))
                .and(predicate::str::contains("bulk")),
        );
}

#[test]
fn test_config_subcommands_exist() {
    syncdeck_cmd()
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("init")
                .and(predicate::str::contains("show"))
                .and(predicate::str::contains("profiles")),
        );
}

// ── Against a mock daemon ───────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_system_status_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/system/status"))
        .and(header("X-API-Key", "test-key"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "myID": DEVICE_A, "uptime": 5 })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut cmd = against(&server.uri());
    cmd.args(["-o", "envelope", "system", "status"]);
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let body: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["myID"], json!(DEVICE_A));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_devices_list_merges_connection_state() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/system/config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "version": 37,
            "devices": [{ "deviceID": DEVICE_A, "name": "laptop", "addresses": ["dynamic"] }],
            "folders": []
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/system/connections"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "connections": { DEVICE_A: { "connected": true, "address": "10.0.0.2:22000" } }
        })))
        .mount(&server)
        .await;

    let mut cmd = against(&server.uri());
    cmd.args(["-o", "json", "devices", "list"]);
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let body: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body[0]["deviceID"], json!(DEVICE_A));
    assert_eq!(body[0]["connected"], json!(true));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rejected_key_maps_to_auth_exit_code() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let mut cmd = against(&server.uri());
    cmd.args(["-o", "envelope", "folders", "list"]);
    let output = run(cmd).await;

    assert_eq!(output.status.code(), Some(3));
    let body: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body["success"], json!(false));
    assert!(body["error"].as_str().unwrap().contains("API key"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_adding_a_duplicate_folder_is_a_conflict() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/system/config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "devices": [],
            "folders": [{ "id": "docs", "path": "/d", "devices": [] }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/system/config"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut cmd = against(&server.uri());
    cmd.args(["folders", "add", "docs", "/elsewhere"]);
    let output = run(cmd).await;

    assert_eq!(output.status.code(), Some(6), "{}", combined_output(&output));
}
