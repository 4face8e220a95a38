//! Per-commit file diffs.
//!
//! A [`CommitDiff`] describes what a commit changed relative to its parent:
//! for every file recorded in the commit, its content and either a line diff
//! against the parent's version of the same path, or a note that there is
//! nothing to compare against.
//!
//! Objects that have gone missing from the store do not abort the whole
//! diff; the affected files report [`FileChange::Missing`] instead.

use tracing::warn;

use crate::diff::{diff_lines, LineDiff};
use crate::error::{Error, Result};
use crate::objects::{Commit, ObjectStore, Oid};

/// How a file in a commit relates to the parent commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileChange {
    /// The commit has no parent; there is nothing to compare against.
    FirstCommit,
    /// The parent commit has no entry for this path.
    NewFile,
    /// The parent has an entry for this path; the diff runs from the
    /// parent's content to this commit's content.
    Modified(LineDiff),
    /// An object needed to compare this file is not in the store: the
    /// file's own blob, the parent commit, or the parent's blob.
    Missing(Oid),
}

/// One file of a commit together with its change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiff {
    path: String,
    oid: Oid,
    content: String,
    change: FileChange,
}

impl FileDiff {
    /// Returns the file path as recorded in the commit.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the Oid of the file's content in this commit.
    pub fn oid(&self) -> &Oid {
        &self.oid
    }

    /// Returns the file's content in this commit (empty if its blob is
    /// missing).
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns how the file changed relative to the parent.
    pub fn change(&self) -> &FileChange {
        &self.change
    }

    /// Returns the line diff, if the parent had this path.
    pub fn diff(&self) -> Option<&LineDiff> {
        match &self.change {
            FileChange::Modified(diff) => Some(diff),
            _ => None,
        }
    }
}

/// The changes introduced by one commit.
#[derive(Debug, Clone)]
pub struct CommitDiff {
    commit: Commit,
    files: Vec<FileDiff>,
}

impl CommitDiff {
    /// Computes the file diffs of `commit` against its parent.
    ///
    /// Each file is matched to the parent's entry with the same path (the
    /// last one, if the parent staged the path more than once).
    ///
    /// # Errors
    ///
    /// Fails if the parent or a blob exists but cannot be read or is not
    /// the expected kind of object. Missing objects are reported per file
    /// as [`FileChange::Missing`].
    pub fn compute(store: &ObjectStore, commit: Commit) -> Result<Self> {
        let base = match commit.parent() {
            None => Base::Root,
            Some(oid) => match found(store.read_commit(oid))? {
                Some(parent) => Base::Parent(parent),
                None => {
                    warn!(parent = %oid.short(), "parent commit is missing");
                    Base::Missing(*oid)
                }
            },
        };

        let mut files = Vec::with_capacity(commit.files().len());
        for entry in commit.files() {
            let (content, change) = match found(store.read_blob(entry.oid()))? {
                None => {
                    warn!(path = entry.path(), oid = %entry.oid().short(), "blob is missing");
                    (String::new(), FileChange::Missing(*entry.oid()))
                }
                Some(blob) => {
                    let content = blob.text().into_owned();
                    let change = base.compare(store, entry.path(), &content)?;
                    (content, change)
                }
            };

            files.push(FileDiff {
                path: entry.path().to_string(),
                oid: *entry.oid(),
                content,
                change,
            });
        }

        Ok(CommitDiff { commit, files })
    }

    /// Returns the commit being shown.
    pub fn commit(&self) -> &Commit {
        &self.commit
    }

    /// Returns the per-file changes, in the commit's file order.
    pub fn files(&self) -> &[FileDiff] {
        &self.files
    }
}

/// What the files of a commit are compared against.
enum Base {
    Root,
    Parent(Commit),
    Missing(Oid),
}

impl Base {
    fn compare(&self, store: &ObjectStore, path: &str, content: &str) -> Result<FileChange> {
        let parent = match self {
            Base::Root => return Ok(FileChange::FirstCommit),
            Base::Missing(oid) => return Ok(FileChange::Missing(*oid)),
            Base::Parent(parent) => parent,
        };

        let previous = match parent.file(path) {
            Some(entry) => entry,
            None => return Ok(FileChange::NewFile),
        };

        Ok(match found(store.read_blob(previous.oid()))? {
            Some(old) => FileChange::Modified(diff_lines(&old.text(), content)),
            None => {
                warn!(path, oid = %previous.oid().short(), "parent blob is missing");
                FileChange::Missing(*previous.oid())
            }
        })
    }
}

/// Turns `ObjectNotFound` into `None`, passing other errors through.
fn found<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(Error::ObjectNotFound(_)) => Ok(None),
        Err(e) => Err(e),
    }
}
