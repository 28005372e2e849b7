//! Integration tests for the `sysdash` CLI binary.
//!
//! Argument parsing, config management and error exit codes run without
//! any service; command output is checked against wiremock servers.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Nothing listens here; connections are refused immediately.
const DEAD_URL: &str = "http://127.0.0.1:9";

/// Build a [`Command`] for the `sysdash` binary with env isolation.
///
/// Clears `SYSDASH_*` variables and points config directories at `home`
/// so tests never touch the user's real configuration.
fn sysdash_cmd(home: &TempDir) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("sysdash");
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("SYSDASH_SYSTEM_URL")
        .env_remove("SYSDASH_NETWORK_URL")
        .env_remove("SYSDASH_OUTPUT")
        .env_remove("SYSDASH_TIMEOUT")
        .env_remove("SYSDASH_ENDPOINTS__SYSTEM")
        .env_remove("SYSDASH_ENDPOINTS__NETWORK");
    cmd
}

/// Command wired to `server` for both services.
fn against(home: &TempDir, server: &MockServer) -> assert_cmd::Command {
    let mut cmd = sysdash_cmd(home);
    cmd.args([
        "--system-url",
        &server.uri(),
        "--network-url",
        &format!("{}/api", server.uri()),
    ]);
    cmd
}

async fn mount_json(server: &MockServer, route: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let home = TempDir::new().unwrap();
    let output = sysdash_cmd(&home).output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_lists_commands() {
    let home = TempDir::new().unwrap();
    sysdash_cmd(&home).arg("--help").assert().success().stdout(
        predicate::str::contains("status")
            .and(predicate::str::contains("speedtest"))
            .and(predicate::str::contains("power-plan"))
            .and(predicate::str::contains("bandwidth")),
    );
}

#[test]
fn test_version_flag() {
    let home = TempDir::new().unwrap();
    sysdash_cmd(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sysdash"));
}

#[test]
fn test_completions_zsh() {
    let home = TempDir::new().unwrap();
    sysdash_cmd(&home)
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_invalid_power_plan_is_rejected() {
    let home = TempDir::new().unwrap();
    sysdash_cmd(&home)
        .args(["power-plan", "turbo"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("turbo"));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path_is_under_config_home() {
    let home = TempDir::new().unwrap();
    sysdash_cmd(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sysdash").and(predicate::str::contains("config.toml")));
}

#[test]
fn test_config_init_refuses_to_overwrite() {
    let home = TempDir::new().unwrap();
    sysdash_cmd(&home).args(["config", "init"]).assert().success();
    sysdash_cmd(&home)
        .args(["config", "init"])
        .assert()
        .code(6)
        .stderr(predicate::str::contains("already exists"));
    sysdash_cmd(&home)
        .args(["config", "init", "--force"])
        .assert()
        .success();
}

#[test]
fn test_config_show_applies_flag_overrides() {
    let home = TempDir::new().unwrap();
    sysdash_cmd(&home)
        .args(["--system-url", "http://10.0.0.5:5000", "config", "show", "-o", "json"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("http://10.0.0.5:5000")
                .and(predicate::str::contains("network_interval_ms")),
        );
}

#[test]
fn test_invalid_url_is_a_usage_error() {
    let home = TempDir::new().unwrap();
    sysdash_cmd(&home)
        .args(["--system-url", "not a url", "status"])
        .assert()
        .code(2);
}

// ── Degraded services ───────────────────────────────────────────────

#[test]
fn test_status_falls_back_to_mock_when_unreachable() {
    let home = TempDir::new().unwrap();
    sysdash_cmd(&home)
        .args(["--system-url", DEAD_URL, "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(mock)"));
}

#[test]
fn test_network_unreachable_exits_with_connection_code() {
    let home = TempDir::new().unwrap();
    sysdash_cmd(&home)
        .args(["--network-url", DEAD_URL, "network"])
        .assert()
        .code(7);
}

// ── Live services ───────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_battery_json_output() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/battery",
        json!({ "battery_level": 80, "is_charging": true, "time_left": 95 }),
    )
    .await;
    mount_json(&server, "/gaming-mode/status", json!({ "gaming_mode": true })).await;

    let home = TempDir::new().unwrap();
    against(&home, &server)
        .args(["battery", "-o", "json"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("\"gaming_mode\": true")
                .and(predicate::str::contains("\"is_charging\": true"))
                .and(predicate::str::contains("\"live\": true")),
        );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_network_devices_plain() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/api/all",
        json!({
            "networkData": { "connectionType": "Ethernet", "ipAddress": "192.168.1.20" },
            "connectedDevices": [
                { "id": "1", "name": "Router", "status": "online" },
                { "id": "2", "name": "Pixel Phone", "status": "online" }
            ]
        }),
    )
    .await;

    let home = TempDir::new().unwrap();
    against(&home, &server)
        .args(["network", "--devices", "-o", "plain"])
        .assert()
        .success()
        .stdout(predicate::eq("Router\nPixel Phone\n"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_speedtest_backend_error_is_reported() {
    let server = MockServer::start().await;
    mount_json(&server, "/api/speedtest", json!({ "error": "No servers available" })).await;

    let home = TempDir::new().unwrap();
    against(&home, &server)
        .args(["speedtest", "-q"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("No servers available"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_power_plan_posts_wire_label() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/set_power_plan"))
        .and(body_json(json!({ "plan": "Power Saver" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "message": "Power plan set to Power Saver" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    against(&home, &server)
        .args(["power-plan", "power-saver"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Power plan set to Power Saver"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_bandwidth_passes_timeframe() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/bandwidth-history"))
        .and(query_param("timeframe", "1hour"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "timestamp": "10:00", "download": 42.5, "upload": 7.25 }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    against(&home, &server)
        .args(["bandwidth", "--timeframe", "1hour", "-o", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("10:00 42.5 7.25"));
}
