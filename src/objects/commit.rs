//! Commit objects.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::oid::Oid;
use crate::error::{Error, Result};
use crate::index::IndexEntry;

/// The stored form of a commit.
///
/// Field order is fixed by the struct definition, so the same commit always
/// serializes to the same bytes and therefore the same Oid.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct CommitRecord {
    timestamp: String,
    message: String,
    files: Vec<IndexEntry>,
    parent: Option<Oid>,
}

/// A commit: an immutable snapshot of the staged files.
///
/// Commits form a singly linked list through [`Commit::parent`]; the root
/// commit has no parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// The Oid of this commit's stored form.
    oid: Oid,
    /// ISO-8601 UTC creation time, e.g. `2024-05-01T12:00:00.000Z`.
    timestamp: String,
    /// The commit message.
    message: String,
    /// The staged entries at commit time, in staging order.
    files: Vec<IndexEntry>,
    /// The previous commit, if any.
    parent: Option<Oid>,
}

impl Commit {
    /// Serializes a new commit record stamped with the current time.
    ///
    /// Returns the bytes to store; the commit's Oid is the hash of them.
    pub fn encode(message: &str, files: &[IndexEntry], parent: Option<Oid>) -> Result<Vec<u8>> {
        Self::encode_at(Utc::now(), message, files, parent)
    }

    /// Serializes a commit record with an explicit timestamp.
    pub fn encode_at(
        time: DateTime<Utc>,
        message: &str,
        files: &[IndexEntry],
        parent: Option<Oid>,
    ) -> Result<Vec<u8>> {
        let record = CommitRecord {
            timestamp: time.to_rfc3339_opts(SecondsFormat::Millis, true),
            message: message.to_string(),
            files: files.to_vec(),
            parent,
        };

        serde_json::to_vec(&record).map_err(|e| Error::InvalidObject {
            oid: String::new(),
            reason: format!("cannot serialize commit: {}", e),
        })
    }

    /// Parses a commit from the bytes stored under `oid`.
    ///
    /// # Errors
    ///
    /// `Error::InvalidObject` if the bytes are not a commit record, which is
    /// the case for every blob.
    pub fn parse(oid: Oid, data: &[u8]) -> Result<Self> {
        let record: CommitRecord =
            serde_json::from_slice(data).map_err(|e| Error::InvalidObject {
                oid: oid.to_hex(),
                reason: format!("not a commit: {}", e),
            })?;

        Ok(Commit {
            oid,
            timestamp: record.timestamp,
            message: record.message,
            files: record.files,
            parent: record.parent,
        })
    }

    /// Returns the Oid of this commit.
    pub fn oid(&self) -> &Oid {
        &self.oid
    }

    /// Returns the creation time as stored (ISO-8601).
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Parses the stored timestamp.
    pub fn time(&self) -> Result<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|e| Error::InvalidObject {
                oid: self.oid.to_hex(),
                reason: format!("invalid timestamp {:?}: {}", self.timestamp, e),
            })
    }

    /// Returns the full commit message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the first line of the commit message.
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    /// Returns the files recorded in this commit, in staging order.
    pub fn files(&self) -> &[IndexEntry] {
        &self.files
    }

    /// Returns the last entry recorded for `path`, if any.
    pub fn file(&self, path: &str) -> Option<&IndexEntry> {
        self.files.iter().rev().find(|entry| entry.path() == path)
    }

    /// Returns the parent commit's Oid, or `None` for the root commit.
    pub fn parent(&self) -> Option<&Oid> {
        self.parent.as_ref()
    }

    /// Returns true if this is the root commit.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}
