//! Blob objects: stored file content.

use std::borrow::Cow;

use super::oid::Oid;

/// The content of one file as it was when staged.
///
/// Blobs carry no path or metadata; the staging entries and commits that
/// reference them supply the path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    /// The Oid the content is stored under.
    oid: Oid,
    /// The raw content of the blob.
    content: Vec<u8>,
}

impl Blob {
    /// Wraps content read from the object store.
    pub(crate) fn new(oid: Oid, content: Vec<u8>) -> Self {
        Blob { oid, content }
    }

    /// Returns the Oid of this blob.
    pub fn oid(&self) -> &Oid {
        &self.oid
    }

    /// Returns the raw content of the blob.
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Returns the content as text.
    ///
    /// Invalid UTF-8 sequences are replaced with U+FFFD.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.content)
    }

    /// Returns the size of the blob content in bytes.
    pub fn size(&self) -> usize {
        self.content.len()
    }

    /// Returns true if the content appears to be binary.
    ///
    /// A NUL byte within the first 8000 bytes marks content as binary.
    pub fn is_binary(&self) -> bool {
        let check_len = self.content.len().min(8000);
        self.content[..check_len].contains(&0)
    }
}
