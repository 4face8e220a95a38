//! Commit history iteration.
//!
//! [`LogIterator`] walks the commit chain from a starting commit (HEAD by
//! default) through parent links, newest first, until the root commit.
//!
//! ```no_run
//! use groot::{log::LogOptions, Repository};
//!
//! let repo = Repository::open(".").unwrap();
//! for commit in repo.log_with_options(LogOptions::new().max_count(10)).unwrap() {
//!     let commit = commit.unwrap();
//!     println!("{} {}", commit.oid().short(), commit.summary());
//! }
//! ```

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::objects::{Commit, ObjectStore, Oid};

/// Options for limiting a history walk.
#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    /// Maximum number of commits to return.
    max_count: Option<usize>,
    /// Starting commit OID (defaults to HEAD if not specified).
    from: Option<Oid>,
}

impl LogOptions {
    /// Creates a new `LogOptions` with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of commits to return.
    pub fn max_count(mut self, n: usize) -> Self {
        self.max_count = Some(n);
        self
    }

    /// Starts the walk at `oid` instead of HEAD.
    pub fn from(mut self, oid: Oid) -> Self {
        self.from = Some(oid);
        self
    }

    /// Returns the configured starting commit OID.
    pub fn get_from(&self) -> Option<&Oid> {
        self.from.as_ref()
    }
}

/// An iterator over commits, newest first.
///
/// The starting point is fixed when the iterator is created. Commits made
/// while a walk is in progress are never yielded by that walk; start a new
/// one to see them.
///
/// If a commit cannot be read, the error is yielded once and the walk ends.
#[derive(Debug)]
pub struct LogIterator {
    /// The object store commits are read from.
    store: ObjectStore,
    /// The next commit to yield.
    next: Option<Oid>,
    /// Commits already yielded, guarding against a corrupt parent cycle.
    visited: HashSet<Oid>,
    /// Filtering options.
    options: LogOptions,
    /// Number of commits yielded so far.
    count: usize,
}

impl LogIterator {
    /// Creates a LogIterator starting at `start` (`None` yields nothing).
    pub fn new(store: ObjectStore, start: Option<Oid>) -> Self {
        Self::with_options(store, start, LogOptions::default())
    }

    /// Creates a LogIterator with options. `options.from` takes precedence
    /// over `start`.
    pub fn with_options(store: ObjectStore, start: Option<Oid>, options: LogOptions) -> Self {
        let next = options.from.or(start);
        LogIterator {
            store,
            next,
            visited: HashSet::new(),
            options,
            count: 0,
        }
    }
}

impl Iterator for LogIterator {
    type Item = Result<Commit>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(max) = self.options.max_count {
            if self.count >= max {
                return None;
            }
        }

        let oid = self.next.take()?;

        if !self.visited.insert(oid) {
            return Some(Err(Error::InvalidObject {
                oid: oid.to_hex(),
                reason: "commit history contains a cycle".to_string(),
            }));
        }

        match self.store.read_commit(&oid) {
            Ok(commit) => {
                self.next = commit.parent().copied();
                self.count += 1;
                Some(Ok(commit))
            }
            Err(e) => Some(Err(e)),
        }
    }
}
