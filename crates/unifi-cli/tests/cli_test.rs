//! Integration tests for the `unifi` CLI binary.
//!
//! Argument handling, config commands and filter errors run without a
//! controller; `clients list` runs end to end against a wiremock server.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `unifi` binary with env isolation.
///
/// Clears all `UNIFI_*` env vars and points `UNIFI_CONFIG` into `dir` so
/// tests never touch the user's real configuration.
fn unifi_cmd(dir: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("unifi");
    cmd.env("UNIFI_CONFIG", dir.join("config.toml"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("UNIFI_PROFILE")
        .env_remove("UNIFI_CONTROLLER")
        .env_remove("UNIFI_HOST")
        .env_remove("UNIFI_SITE")
        .env_remove("UNIFI_API_KEY")
        .env_remove("UNIFI_OUTPUT")
        .env_remove("UNIFI_COLOR")
        .env_remove("UNIFI_INSECURE")
        .env_remove("UNIFI_TIMEOUT");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn client(mac: &str, name: &str, wired: bool, signal: i64) -> Value {
    json!({
        "_id": format!("id-{name}"),
        "mac": mac,
        "name": name,
        "ip": "192.168.1.20",
        "is_wired": wired,
        "essid": if wired { "" } else { "HomeWiFi" },
        "signal": signal,
        "uptime": 7200,
        "rx_bytes": 1_048_576,
        "tx_bytes": 2048
    })
}

/// Controller serving the five-client fixture on the UniFi OS path.
async fn mock_controller() -> MockServer {
    let server = MockServer::start().await;
    let envelope = json!({
        "meta": { "rc": "ok" },
        "data": [
            client("aa:00:00:00:00:01", "iPhone", false, -45),
            client("aa:00:00:00:00:02", "MacBook", true, 0),
            client("aa:00:00:00:00:03", "iPad", false, -70),
            client("aa:00:00:00:00:04", "Desktop", true, 0),
            client("aa:00:00:00:00:05", "Android", false, -55)
        ]
    });
    Mock::given(method("GET"))
        .and(path("/proxy/network/api/s/default/stat/sta"))
        .and(header("X-API-KEY", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&envelope))
        .mount(&server)
        .await;
    server
}

fn list_against(server: &MockServer, dir: &Path, args: &[&str]) -> std::process::Output {
    let uri = server.uri();
    unifi_cmd(dir)
        .args(["--controller", uri.as_str(), "--api-key", "test-key"])
        .args(["clients", "list"])
        .args(args)
        .output()
        .unwrap()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let dir = TempDir::new().unwrap();
    let output = unifi_cmd(dir.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    let dir = TempDir::new().unwrap();
    unifi_cmd(dir.path()).arg("--help").assert().success().stdout(
        predicate::str::contains("UniFi network")
            .and(predicate::str::contains("clients"))
            .and(predicate::str::contains("sites"))
            .and(predicate::str::contains("config")),
    );
}

#[test]
fn test_version_flag() {
    let dir = TempDir::new().unwrap();
    unifi_cmd(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("unifi"));
}

#[test]
fn test_clients_list_help_shows_filter_flags() {
    let dir = TempDir::new().unwrap();
    unifi_cmd(dir.path())
        .args(["clients", "list", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("--wired")
                .and(predicate::str::contains("--wireless"))
                .and(predicate::str::contains("--blocked"))
                .and(predicate::str::contains("--ap"))
                .and(predicate::str::contains("--filter")),
        );
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    let dir = TempDir::new().unwrap();
    unifi_cmd(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    let dir = TempDir::new().unwrap();
    unifi_cmd(dir.path())
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Argument and filter errors ──────────────────────────────────────

#[test]
fn test_invalid_output_format() {
    let dir = TempDir::new().unwrap();
    let output = unifi_cmd(dir.path())
        .args(["--output", "invalid", "clients", "list"])
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
fn test_wired_and_wireless_conflict_before_config() {
    let dir = TempDir::new().unwrap();
    // No controller configured: the conflict must win over NoConfig.
    unifi_cmd(dir.path())
        .args(["clients", "list", "--wired", "--wireless", "--filter", "signal > -50"])
        .assert()
        .code(2)
        .stderr(
            predicate::str::contains("--wired and --wireless are mutually exclusive")
                .and(predicate::str::contains("failed to apply client filter").not()),
        );
}

#[test]
fn test_filter_cannot_escape_flag_conjunction() {
    let dir = TempDir::new().unwrap();
    unifi_cmd(dir.path())
        .args(["clients", "list", "--wireless", "--filter", "1 = 2) OR (1 = 1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unmatched ')'"));
}

#[test]
fn test_unknown_field_lists_valid_fields() {
    let dir = TempDir::new().unwrap();
    unifi_cmd(dir.path())
        .args(["clients", "list", "--filter", "colour = 'red'"])
        .assert()
        .code(2)
        .stderr(
            predicate::str::contains("colour")
                .and(predicate::str::contains("is_wired"))
                .and(predicate::str::contains("unifi clients fields")),
        );
}

#[test]
fn test_syntax_error_exits_with_usage() {
    let dir = TempDir::new().unwrap();
    unifi_cmd(dir.path())
        .args(["clients", "list", "--filter", "signal >= = 5"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("syntax error"));
}

#[test]
fn test_type_mismatch_exits_with_usage() {
    let dir = TempDir::new().unwrap();
    unifi_cmd(dir.path())
        .args(["clients", "list", "--filter", "essid > 5"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("essid"));
}

#[test]
fn test_clients_list_no_controller() {
    let dir = TempDir::new().unwrap();
    unifi_cmd(dir.path())
        .args(["clients", "list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No controller configured"));
}

#[test]
fn test_missing_api_key() {
    let dir = TempDir::new().unwrap();
    unifi_cmd(dir.path())
        .args(["--controller", "https://192.168.1.1", "clients", "list"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("No API key"));
}

// ── Fields ──────────────────────────────────────────────────────────

#[test]
fn test_clients_fields_json() {
    let dir = TempDir::new().unwrap();
    let output = unifi_cmd(dir.path())
        .args(["clients", "fields", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let fields: Value = serde_json::from_slice(&output.stdout).unwrap();
    let fields = fields.as_array().unwrap();
    assert!(fields.contains(&json!({ "name": "signal", "type": "integer" })));
    assert!(fields.contains(&json!({ "name": "essid", "type": "string" })));
    assert!(fields.contains(&json!({ "name": "is_wired", "type": "boolean" })));
}

#[test]
fn test_clients_fields_plain() {
    let dir = TempDir::new().unwrap();
    unifi_cmd(dir.path())
        .args(["clients", "fields", "-o", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("mac\n").and(predicate::str::contains("rx_bytes_r")));
}

// ── Config commands ─────────────────────────────────────────────────

#[test]
fn test_config_path_honours_env() {
    let dir = TempDir::new().unwrap();
    let expected = dir.path().join("config.toml");
    unifi_cmd(dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(expected.display().to_string()));
}

#[test]
fn test_config_show_no_config() {
    let dir = TempDir::new().unwrap();
    unifi_cmd(dir.path()).args(["config", "show"]).assert().success();
}

#[test]
fn test_config_set_then_profiles_and_show() {
    let dir = TempDir::new().unwrap();

    unifi_cmd(dir.path())
        .args(["config", "set", "controller", "https://10.0.0.1"])
        .assert()
        .success();
    unifi_cmd(dir.path())
        .args(["config", "set", "api_key", "plaintext-secret"])
        .assert()
        .success();
    unifi_cmd(dir.path())
        .args(["-p", "lab", "config", "set", "controller", "https://10.0.0.2"])
        .assert()
        .success();

    unifi_cmd(dir.path())
        .args(["config", "profiles"])
        .assert()
        .success()
        .stdout("default *\nlab\n");

    unifi_cmd(dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("https://10.0.0.1")
                .and(predicate::str::contains("********"))
                .and(predicate::str::contains("plaintext-secret").not()),
        );

    unifi_cmd(dir.path())
        .args(["config", "use", "lab"])
        .assert()
        .success();
    unifi_cmd(dir.path())
        .args(["config", "profiles"])
        .assert()
        .success()
        .stdout("default\nlab *\n");
}

#[test]
fn test_config_set_rejects_unknown_key() {
    let dir = TempDir::new().unwrap();
    unifi_cmd(dir.path())
        .args(["config", "set", "colour", "red"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("colour"));
}

#[test]
fn test_config_use_unknown_profile() {
    let dir = TempDir::new().unwrap();
    unifi_cmd(dir.path())
        .args(["config", "use", "nowhere"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("nowhere"));
}

// ── End to end against a mock controller ────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_clients_list_wireless_strong_signal_plain() {
    let server = mock_controller().await;
    let dir = TempDir::new().unwrap();

    let output = list_against(
        &server,
        dir.path(),
        &["--wireless", "--filter", "signal >= -60", "-o", "plain"],
    );
    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(stdout_of(&output), "aa:00:00:00:00:01\naa:00:00:00:00:05\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_clients_list_json_keeps_wire_names() {
    let server = mock_controller().await;
    let dir = TempDir::new().unwrap();

    let output = list_against(
        &server,
        dir.path(),
        &["--filter", "signal BETWEEN -60 AND -50 OR name IN ('MacBook')", "-o", "json"],
    );
    assert!(output.status.success(), "{}", combined_output(&output));

    let clients: Value = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<&str> = clients
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["MacBook", "Android"]);
    assert_eq!(clients[0]["_id"], "id-MacBook");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_clients_list_table() {
    let server = mock_controller().await;
    let dir = TempDir::new().unwrap();

    let output = list_against(&server, dir.path(), &["--filter", "name LIKE 'i%'"]);
    assert!(output.status.success(), "{}", combined_output(&output));

    let table = stdout_of(&output);
    assert!(table.contains("iPhone (aa:00:00:00:00:01)"));
    assert!(table.contains("iPad (aa:00:00:00:00:03)"));
    assert!(table.contains("-45 dBm"));
    assert!(table.contains("HomeWiFi"));
    assert!(!table.contains("Android"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_clients_list_empty_result() {
    let server = mock_controller().await;
    let dir = TempDir::new().unwrap();

    let output = list_against(&server, dir.path(), &["--filter", "1 = 0"]);
    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "No clients match the specified filters\n");

    let output = list_against(&server, dir.path(), &["--filter", "1 = 0", "-o", "json-compact"]);
    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "[]\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_clients_list_rejected_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();

    let output = list_against(&server, dir.path(), &[]);
    assert_eq!(output.status.code(), Some(3), "{}", combined_output(&output));
}
