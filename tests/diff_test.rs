//! Integration tests for the line diff engine and commit show.
//!
//! Test cases: DF-001 to DF-011

use groot::error::Error;
use groot::{diff_lines, FileChange, LineKind, Repository};
use std::fs;
use tempfile::TempDir;

/// Helper to create an initialized repository in a fresh directory.
fn create_test_repo() -> (TempDir, Repository) {
    let temp = TempDir::new().unwrap();
    let repo = Repository::init(temp.path()).unwrap();
    (temp, repo)
}

/// Writes, stages and commits a single file.
fn commit_file(temp: &TempDir, repo: &Repository, path: &str, content: &str) -> groot::Oid {
    fs::write(temp.path().join(path), content).unwrap();
    repo.add(path).unwrap();
    repo.commit(&format!("update {}", path)).unwrap()
}

// DF-001: the edit script reproduces both inputs
#[test]
fn test_df001_diff_reconstructs_inputs() {
    let cases = [
        ("", ""),
        ("", "a\nb\n"),
        ("a\nb\n", ""),
        ("a\nb\nc\n", "a\nc\nd\n"),
        ("one\ntwo\nthree", "zero\none\nthree\nfour"),
        ("x\nx\nx\n", "x\ny\nx\n"),
        ("no newline", "no newline\n"),
    ];

    for (old, new) in cases {
        let diff = diff_lines(old, new);
        assert_eq!(diff.old_text(), old, "old side of {:?} -> {:?}", old, new);
        assert_eq!(diff.new_text(), new, "new side of {:?} -> {:?}", old, new);
    }
}

// DF-002: the edit script keeps the longest common subsequence
#[test]
fn test_df002_diff_is_minimal() {
    let diff = diff_lines("a\nb\nc\nd\ne\n", "a\nc\ne\nf\n");
    let stats = diff.stats();

    assert_eq!(stats.unchanged, 3);
    assert_eq!(stats.removed, 2);
    assert_eq!(stats.added, 1);
}

// DF-003: two-commit show scenario
#[test]
fn test_df003_show_modified_file() {
    let (temp, repo) = create_test_repo();
    commit_file(&temp, &repo, "a.txt", "hello");
    let second = commit_file(&temp, &repo, "a.txt", "hello world");

    let diff = repo.show_commit(&second.to_hex()).unwrap().unwrap();
    assert_eq!(diff.commit().oid(), &second);
    assert_eq!(diff.files().len(), 1);

    let file = &diff.files()[0];
    assert_eq!(file.path(), "a.txt");
    assert_eq!(file.content(), "hello world");

    let lines: Vec<_> = file
        .diff()
        .unwrap()
        .iter()
        .map(|c| (c.kind(), c.line()))
        .collect();
    assert_eq!(
        lines,
        [(LineKind::Removed, "hello"), (LineKind::Added, "hello world")]
    );
}

// DF-004: first commit has nothing to compare against
#[test]
fn test_df004_show_first_commit() {
    let (temp, repo) = create_test_repo();
    let first = commit_file(&temp, &repo, "a.txt", "hello");

    let diff = repo.show_commit(&first.to_hex()).unwrap().unwrap();
    assert_eq!(diff.files()[0].change(), &FileChange::FirstCommit);
}

// DF-005: a path absent from the parent is a new file
#[test]
fn test_df005_show_new_file() {
    let (temp, repo) = create_test_repo();
    commit_file(&temp, &repo, "a.txt", "hello");
    let second = commit_file(&temp, &repo, "b.txt", "other");

    let diff = repo.show_commit(&second.to_hex()).unwrap().unwrap();
    assert_eq!(diff.files()[0].path(), "b.txt");
    assert_eq!(diff.files()[0].change(), &FileChange::NewFile);
}

// DF-006: abbreviated ids resolve
#[test]
fn test_df006_show_short_id() {
    let (temp, repo) = create_test_repo();
    let first = commit_file(&temp, &repo, "a.txt", "hello");

    let diff = repo.show_commit(&first.short()).unwrap().unwrap();
    assert_eq!(diff.commit().oid(), &first);
}

// DF-007: unknown and malformed ids are not found
#[test]
fn test_df007_show_not_found() {
    let (temp, repo) = create_test_repo();
    commit_file(&temp, &repo, "a.txt", "hello");

    assert!(repo.show_commit(&"0".repeat(64)).unwrap().is_none());
    assert!(repo.show_commit("deadbeef").unwrap().is_none());
    assert!(repo.show_commit("nonexistent").unwrap().is_none());
}

// DF-008: showing a blob id is an error
#[test]
fn test_df008_show_blob_id() {
    let (temp, repo) = create_test_repo();
    fs::write(temp.path().join("a.txt"), "hello").unwrap();
    let blob = repo.add("a.txt").unwrap();

    assert!(matches!(
        repo.show_commit(&blob.to_hex()),
        Err(Error::InvalidObject { .. })
    ));
}

// DF-009: the parent's last entry for a path is the one compared
#[test]
fn test_df009_show_uses_last_parent_entry() {
    let (temp, repo) = create_test_repo();
    fs::write(temp.path().join("a.txt"), "old\n").unwrap();
    repo.add("a.txt").unwrap();
    fs::write(temp.path().join("a.txt"), "middle\n").unwrap();
    repo.add("a.txt").unwrap();
    repo.commit("staged twice").unwrap();

    let second = commit_file(&temp, &repo, "a.txt", "middle\n");

    let diff = repo.show_commit(&second.to_hex()).unwrap().unwrap();
    assert!(diff.files()[0].diff().unwrap().is_unchanged());
}

// DF-010: multi-line edit keeps context lines
#[test]
fn test_df010_show_multiline() {
    let (temp, repo) = create_test_repo();
    commit_file(&temp, &repo, "notes.md", "# Notes\n\n- one\n- two\n");
    let second = commit_file(&temp, &repo, "notes.md", "# Notes\n\n- one\n- three\n- four\n");

    let diff = repo.show_commit(&second.to_hex()).unwrap().unwrap();
    let script: Vec<_> = diff.files()[0]
        .diff()
        .unwrap()
        .iter()
        .map(|c| (c.kind().as_char(), c.line()))
        .collect();
    assert_eq!(
        script,
        [
            (' ', "# Notes"),
            (' ', ""),
            (' ', "- one"),
            ('-', "- two"),
            ('+', "- three"),
            ('+', "- four"),
        ]
    );
}

// DF-011: a deleted parent blob is reported, not fatal
#[test]
fn test_df011_show_missing_parent_blob() {
    let (temp, repo) = create_test_repo();
    commit_file(&temp, &repo, "a.txt", "hello");
    let second = commit_file(&temp, &repo, "a.txt", "hello world");

    let hello = groot::Oid::hash(b"hello");
    fs::remove_file(repo.object_store().object_path(&hello)).unwrap();

    let diff = repo.show_commit(&second.to_hex()).unwrap().unwrap();
    assert_eq!(diff.files()[0].content(), "hello world");
    assert_eq!(diff.files()[0].change(), &FileChange::Missing(hello));
}
