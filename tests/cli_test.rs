//! End-to-end tests for the `groot` binary.
//!
//! Test cases: CLI-001 to CLI-008

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn groot(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("groot").unwrap();
    cmd.env_remove("GROOT_DIR")
        .env("NO_COLOR", "1")
        .arg("--repo")
        .arg(dir.path());
    cmd
}

/// Runs `groot commit` and returns the new commit id.
fn commit(dir: &TempDir, message: &str) -> String {
    let output = groot(dir).args(["commit", message]).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    stdout.trim().rsplit(' ').next().unwrap().to_string()
}

// CLI-001: init reports creation, then that it already exists
#[test]
fn test_cli001_init() {
    let temp = TempDir::new().unwrap();

    groot(&temp)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized empty groot repository"));
    groot(&temp)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Already initialized the .groot folder"));
}

// CLI-002: init, add, commit, log
#[test]
fn test_cli002_add_commit_log() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("a.txt"), "hello").unwrap();

    groot(&temp)
        .args(["add", "a.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added a.txt"));

    let id = commit(&temp, "first");
    assert_eq!(id.len(), 64);

    groot(&temp)
        .arg("log")
        .assert()
        .success()
        .stdout(predicate::str::contains(id.as_str()))
        .stdout(predicate::str::contains("first"))
        .stdout(predicate::str::contains("Date:"));
}

// CLI-003: show prints the line diff against the parent
#[test]
fn test_cli003_show_diff() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("a.txt"), "hello").unwrap();
    groot(&temp).args(["add", "a.txt"]).assert().success();
    let first = commit(&temp, "first");

    fs::write(temp.path().join("a.txt"), "hello world").unwrap();
    groot(&temp).args(["add", "a.txt"]).assert().success();
    let second = commit(&temp, "second");

    groot(&temp)
        .args(["show", &first])
        .assert()
        .success()
        .stdout(predicate::str::contains("First commit"));

    groot(&temp)
        .args(["show", &second])
        .assert()
        .success()
        .stdout(predicate::str::contains("--hello"))
        .stdout(predicate::str::contains("++hello world"));
}

// CLI-004: show on an unknown id is not a failure
#[test]
fn test_cli004_show_not_found() {
    let temp = TempDir::new().unwrap();

    groot(&temp)
        .args(["show", "nonexistent"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Commit not found"));
}

// CLI-005: adding a missing file fails with a message
#[test]
fn test_cli005_add_missing() {
    let temp = TempDir::new().unwrap();

    groot(&temp)
        .args(["add", "missing.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.txt"));
}

// CLI-006: GROOT_DIR selects the repository
#[test]
fn test_cli006_env_repo() {
    let temp = TempDir::new().unwrap();

    Command::cargo_bin("groot")
        .unwrap()
        .env("GROOT_DIR", temp.path())
        .arg("init")
        .assert()
        .success();
    assert!(temp.path().join(".groot/objects").is_dir());
}

// CLI-007: log -n limits the output
#[test]
fn test_cli007_log_max_count() {
    let temp = TempDir::new().unwrap();
    commit(&temp, "first");
    commit(&temp, "second");

    groot(&temp)
        .args(["log", "-n", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("second"))
        .stdout(predicate::str::contains("first").not());
}

// CLI-008: show survives a blob deleted from the store
#[test]
fn test_cli008_show_missing_parent_blob() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("a.txt"), "hello").unwrap();
    groot(&temp).args(["add", "a.txt"]).assert().success();
    commit(&temp, "first");

    fs::write(temp.path().join("a.txt"), "hello world").unwrap();
    groot(&temp).args(["add", "a.txt"]).assert().success();
    let second = commit(&temp, "second");

    let hello = groot::Oid::hash(b"hello");
    fs::remove_file(temp.path().join(".groot/objects").join(hello.to_hex())).unwrap();

    groot(&temp)
        .args(["show", &second])
        .assert()
        .success()
        .stdout(predicate::str::contains("hello world"))
        .stdout(predicate::str::contains(format!("Object {} not found", hello.short())));
}
