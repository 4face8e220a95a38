//! # groot
//!
//! A minimal local version-control engine.
//!
//! groot records snapshots of individual files in a content-addressed object
//! store, chains snapshots into a single linear commit history, and
//! reconstructs line-level differences between successive versions of a
//! file.
//!
//! ## Quick Start
//!
//! ```no_run
//! use groot::{Repository, Result};
//!
//! fn main() -> Result<()> {
//!     // Create (or reopen) a repository in the current directory
//!     let repo = Repository::init(".")?;
//!
//!     // Stage a file and commit it
//!     repo.add("notes.txt")?;
//!     let oid = repo.commit("Add notes")?;
//!
//!     // Walk the history
//!     for commit in repo.log()? {
//!         let commit = commit?;
//!         println!("{} {}", commit.oid().short(), commit.summary());
//!     }
//!
//!     // See what a commit changed
//!     if let Some(diff) = repo.show_commit(&oid.to_hex())? {
//!         for file in diff.files() {
//!             println!("{}: {:?}", file.path(), file.change());
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Module Overview
//!
//! - [`error`] - Error types and Result alias
//! - [`repository`] - Main `Repository` type
//! - [`objects`] - Object IDs, blobs, commits and the object store
//! - [`index`] - Staging index
//! - [`refs`] - The HEAD pointer
//! - [`log`] - History walking
//! - [`diff`] - Line diff engine
//! - [`show`] - Per-commit file diffs

pub mod diff;
pub mod error;
pub mod index;
pub mod log;
pub mod objects;
pub mod refs;
pub mod repository;
pub mod show;

// Internal modules (not part of public API)
pub(crate) mod infra;

pub use error::{Error, Result};
pub use repository::{InitStatus, Repository};

pub use objects::{Blob, Commit, ObjectStore, Oid};

pub use index::{Index, IndexEntry};

pub use log::{LogIterator, LogOptions};

pub use diff::{diff_lines, DiffStats, LineChange, LineDiff, LineKind};

pub use show::{CommitDiff, FileChange, FileDiff};
