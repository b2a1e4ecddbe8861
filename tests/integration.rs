// Integration tests for the shaft CLI surface.
//
// These tests use assert_cmd to invoke the binary and verify
// exit codes and stdout/stderr output.

#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper to build a Command for the shaft binary.
fn shaft() -> Command {
    Command::cargo_bin("shaft").expect("binary should exist")
}

#[test]
fn cli_version_flag() {
    shaft()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("shaft"));
}

#[test]
fn cli_help_flag() {
    shaft()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("officiating history"));
}

#[test]
fn rank_requires_path() {
    shaft()
        .arg("rank")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn inspect_requires_file() {
    shaft()
        .arg("inspect")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn rank_rejects_malformed_freeze_date() {
    shaft()
        .args(["rank", ".", "--freeze-date", "yesterday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--freeze-date"));
}

#[test]
fn quiet_and_verbose_conflict() {
    shaft()
        .args(["-q", "-v", "rank", "."])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn rank_missing_directory_is_runtime_failure() {
    let dir = TempDir::new().expect("temp dir should be created");
    shaft()
        .arg("rank")
        .arg(dir.path().join("missing"))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("path does not exist"));
}

#[test]
fn inspect_missing_file_is_runtime_failure() {
    let dir = TempDir::new().expect("temp dir should be created");
    shaft()
        .arg("inspect")
        .arg(dir.path().join("nobody.json"))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("path does not exist"));
}

#[test]
fn malformed_config_is_runtime_failure() {
    let dir = TempDir::new().expect("temp dir should be created");
    std::fs::write(dir.path().join("shaft.toml"), "[[models]]\nname = ").expect("config should write");
    shaft()
        .arg("rank")
        .arg(dir.path())
        .assert()
        .code(3)
        .stderr(predicate::str::contains("config parse error"));
}
