/// End-to-end tests for config file loading and CLI option merging.
///
/// These tests exercise the flow from a config file on disk through CLI
/// invocation, using `assert_cmd` and `tempfile` for isolated environments.
/// No test reaches a live SDS API.
use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ============================================================================
// Helper Functions
// ============================================================================

/// Write `sds-client.config.yml` into `dir` so it is auto-discovered.
fn write_discovered_config(dir: &Path, content: &str) {
    fs::write(dir.join("sds-client.config.yml"), content).unwrap();
}

/// Write a config file with an arbitrary name for use with `--config`.
fn write_named_config(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// A minimal PDF that passes the client-side checks.
fn write_pdf(dir: &Path, name: &str, size: usize) -> PathBuf {
    let mut bytes = b"%PDF-1.7\n".to_vec();
    bytes.resize(size.max(bytes.len()), b' ');
    let path = dir.join(name);
    fs::write(&path, bytes).unwrap();
    path
}

/// The binary running inside `dir`, with no ambient credentials.
fn sds_client_in(dir: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("sds-client");
    cmd.current_dir(dir)
        .env("SDS_CLIENT_HOME", dir)
        .env_remove("SDS_API_KEY")
        .env_remove("SDS_API_BASE_URL")
        .env_remove("RUST_LOG");
    cmd
}

// ============================================================================
// Discovery
// ============================================================================

#[test]
fn test_discovered_config_limits_upload_size() {
    let dir = TempDir::new().unwrap();
    write_discovered_config(dir.path(), "max_upload_bytes: 64\n");
    write_pdf(dir.path(), "sheet.pdf", 256);

    sds_client_in(dir.path())
        .args(["upload", "sheet.pdf"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Maximum allowed size is 64 bytes"));
}

#[test]
fn test_discovered_config_with_unknown_field_warns() {
    let dir = TempDir::new().unwrap();
    write_discovered_config(
        dir.path(),
        "format: markdown\ncheck_cve: true\n",
    );

    // The lookup fails validation after the config was loaded
    sds_client_in(dir.path())
        .arg("details")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Unknown config field 'check_cve'"));
}

#[test]
fn test_discovered_config_with_invalid_yaml_fails() {
    let dir = TempDir::new().unwrap();
    write_discovered_config(dir.path(), "invalid: yaml: [[[broken");

    sds_client_in(dir.path())
        .arg("details")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Failed to parse config file"));
}

// ============================================================================
// Explicit --config
// ============================================================================

#[test]
fn test_explicit_config_missing_file() {
    let dir = TempDir::new().unwrap();

    sds_client_in(dir.path())
        .args(["--config", "does-not-exist.yml", "details", "--sds-id", "1"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Failed to read config file"));
}

#[test]
fn test_explicit_config_with_bad_base_url() {
    let dir = TempDir::new().unwrap();
    let config = write_named_config(dir.path(), "custom.yml", "base_url: file:///etc/passwd\n");

    sds_client_in(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["details", "--sds-id", "1"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Invalid API base URL"));
}

#[test]
fn test_explicit_config_with_zero_poll_interval() {
    let dir = TempDir::new().unwrap();
    let config = write_named_config(dir.path(), "custom.yml", "poll_interval_ms: 0\n");

    sds_client_in(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["upload", "sheet.pdf"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("poll_interval_ms must be greater than 0"));
}

#[test]
fn test_explicit_config_wins_over_discovered_one() {
    let dir = TempDir::new().unwrap();
    write_discovered_config(dir.path(), "max_upload_bytes: 1048576\n");
    let config = write_named_config(dir.path(), "strict.yml", "max_upload_bytes: 16\n");
    write_pdf(dir.path(), "sheet.pdf", 128);

    sds_client_in(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["upload", "sheet.pdf"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Maximum allowed size is 16 bytes"));
}

// ============================================================================
// CLI precedence
// ============================================================================

#[test]
fn test_invalid_config_base_url_fails_even_with_flag() {
    let dir = TempDir::new().unwrap();
    write_discovered_config(dir.path(), "base_url: ftp://not-allowed.example.com\n");

    // Config validation runs on load, so the bad value fails even when
    // the flag would replace it
    sds_client_in(dir.path())
        .args(["--base-url", "http://127.0.0.1:9", "details", "--sds-id", "1"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Invalid API base URL"));
}

#[test]
fn test_env_base_url_is_validated() {
    let dir = TempDir::new().unwrap();

    sds_client_in(dir.path())
        .env("SDS_API_BASE_URL", "https://sds.example.com/?page=1")
        .args(["details", "--sds-id", "1"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Invalid API base URL"));
}
