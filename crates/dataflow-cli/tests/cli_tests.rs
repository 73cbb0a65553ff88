//! CLI integration tests for dataflow.
//!
//! These tests verify command-line argument parsing, help output, and exit
//! codes for configuration errors. They never reach a database: every
//! failing path stops at configuration loading.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

/// Get a command for the dataflow binary.
fn cmd() -> Command {
    Command::cargo_bin("dataflow").unwrap()
}

#[test]
fn test_help_shows_flags() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--config"))
        .stdout(predicate::str::contains("--output-json"))
        .stdout(predicate::str::contains("--verbosity"))
        .stdout(predicate::str::contains("--log-format"));
}

#[test]
fn test_help_shows_default_config_path() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("pipeline-config.json"));
}

#[test]
fn test_version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("dataflow"));
}

#[test]
fn test_missing_config_file_fails() {
    cmd()
        .args(["--config", "does-not-exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_malformed_config_fails() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"{ this is not json").unwrap();

    cmd()
        .arg("--config")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("JSON"));
}

#[test]
fn test_incomplete_config_reports_missing_field() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    // Valid JSON, but the source block is missing entirely.
    file.write_all(br#"{ "target": { "driver": "SQLite3", "urlProtocol": "Database=" } }"#)
        .unwrap();

    cmd()
        .arg("--config")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("source"));
}

#[test]
fn test_config_validation_error_exit_code() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    // Parses fine but fails validation: empty application label.
    file.write_all(
        br#"
        {
          "source": {
            "application": "",
            "rdms": { "driver": "X", "url": "Dbq=A", "imports": [] }
          },
          "target": { "driver": "Y", "urlProtocol": "Database=" }
        }
        "#,
    )
    .unwrap();

    cmd()
        .arg("--config")
        .arg(file.path())
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Configuration error"));
}
