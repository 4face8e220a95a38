//! Staging index operations.
//!
//! The index file (`.groot/index`) is a JSON array of
//! `{"path": ..., "hash": ...}` objects listing the files queued for the
//! next commit, in the order they were added.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::objects::Oid;

/// The staging index.
///
/// Entries are kept in insertion order. Staging a path that is already
/// staged appends a second entry rather than replacing the first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Index {
    entries: Vec<IndexEntry>,
}

impl Index {
    /// Creates a new empty index.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses an index from the contents of the index file.
    ///
    /// Blank content is read as an empty index.
    ///
    /// # Errors
    ///
    /// `Error::InvalidIndex` if the content is not a JSON array of entries.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::empty());
        }

        serde_json::from_slice(data).map_err(|e| Error::InvalidIndex(e.to_string()))
    }

    /// Serializes the index to the bytes of the index file.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| Error::InvalidIndex(e.to_string()))
    }

    /// Returns the number of entries in the index.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the index has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns all entries in insertion order.
    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    /// Returns an iterator over the entries.
    pub fn iter(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.iter()
    }

    /// Returns the most recently staged entry for `path`.
    pub fn get(&self, path: &str) -> Option<&IndexEntry> {
        self.entries.iter().rev().find(|e| e.path == path)
    }

    /// Appends an entry for `path` pointing at `oid`.
    pub fn stage(&mut self, path: impl Into<String>, oid: Oid) {
        self.entries.push(IndexEntry::new(path, oid));
    }

    /// Clears all entries from the index.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Consumes the index and returns its entries.
    pub fn into_entries(self) -> Vec<IndexEntry> {
        self.entries
    }
}

/// One staged file: a path and the Oid of its content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexEntry {
    /// The path as given to `add`, with `/` separators.
    path: String,
    /// The Oid of the blob holding the file's content.
    #[serde(rename = "hash")]
    oid: Oid,
}

impl IndexEntry {
    /// Creates a new IndexEntry.
    pub fn new(path: impl Into<String>, oid: Oid) -> Self {
        IndexEntry {
            path: path.into(),
            oid,
        }
    }

    /// Returns the staged path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the Oid of the staged content.
    pub fn oid(&self) -> &Oid {
        &self.oid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // IX-001: Empty index serializes as []
    #[test]
    fn test_empty_index() {
        let index = Index::empty();
        assert!(index.is_empty());
        assert_eq!(index.to_bytes().unwrap(), b"[]");
    }

    // IX-002: stage() appends in order, without deduplicating paths
    #[test]
    fn test_stage_appends() {
        let mut index = Index::empty();
        index.stage("a.txt", Oid::hash(b"one"));
        index.stage("b.txt", Oid::hash(b"two"));
        index.stage("a.txt", Oid::hash(b"three"));

        let paths: Vec<_> = index.iter().map(|e| e.path()).collect();
        assert_eq!(paths, ["a.txt", "b.txt", "a.txt"]);
        assert_eq!(index.len(), 3);
        assert_eq!(index.get("a.txt").unwrap().oid(), &Oid::hash(b"three"));
        assert!(index.get("c.txt").is_none());
    }

    // IX-003: Entries use "path" and "hash" keys
    #[test]
    fn test_entry_json_shape() {
        let mut index = Index::empty();
        index.stage("a.txt", Oid::hash(b"hello"));

        let json = String::from_utf8(index.to_bytes().unwrap()).unwrap();
        assert_eq!(
            json,
            format!(r#"[{{"path":"a.txt","hash":"{}"}}]"#, Oid::hash(b"hello"))
        );
        assert_eq!(Index::parse(json.as_bytes()).unwrap(), index);
    }

    // IX-004: parse() accepts blank content and rejects garbage
    #[test]
    fn test_parse() {
        assert!(Index::parse(b"").unwrap().is_empty());
        assert!(Index::parse(b"  \n").unwrap().is_empty());
        assert!(Index::parse(b"[]").unwrap().is_empty());
        assert!(matches!(Index::parse(b"{}"), Err(Error::InvalidIndex(_))));
        assert!(matches!(
            Index::parse(br#"[{"path":"a","hash":"zz"}]"#),
            Err(Error::InvalidIndex(_))
        ));
    }

    // IX-005: clear() empties the index
    #[test]
    fn test_clear() {
        let mut index = Index::empty();
        index.stage("a.txt", Oid::hash(b"hello"));
        index.clear();
        assert!(index.is_empty());
        assert!(index.into_entries().is_empty());
    }
}
