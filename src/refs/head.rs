//! The HEAD pointer.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::infra::write_file_atomic;
use crate::objects::Oid;

/// The file naming the most recent commit.
///
/// HEAD holds the hex Oid of the latest commit, or nothing at all before the
/// first commit. Surrounding whitespace is ignored when reading.
#[derive(Debug, Clone)]
pub struct HeadRef {
    path: PathBuf,
}

impl HeadRef {
    /// Creates a HeadRef backed by the file at `path`.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        HeadRef {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Returns the path of the HEAD file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the current head commit.
    ///
    /// A missing or empty HEAD file means there are no commits yet.
    ///
    /// # Errors
    ///
    /// `Error::InvalidObject` if HEAD holds something other than an Oid.
    pub fn read(&self) -> Result<Option<Oid>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::Io(e)),
        };

        let value = content.trim();
        if value.is_empty() {
            return Ok(None);
        }

        Oid::from_hex(value).map(Some).map_err(|_| Error::InvalidObject {
            oid: "HEAD".to_string(),
            reason: format!("not an object id: {:?}", value),
        })
    }

    /// Points HEAD at `oid`.
    pub fn write(&self, oid: &Oid) -> Result<()> {
        write_file_atomic(&self.path, oid.to_hex().as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // HD-001: Missing and empty HEAD read as None
    #[test]
    fn test_read_unborn() {
        let temp = TempDir::new().unwrap();
        let head = HeadRef::new(temp.path().join("HEAD"));
        assert_eq!(head.read().unwrap(), None);

        fs::write(head.path(), "").unwrap();
        assert_eq!(head.read().unwrap(), None);
    }

    // HD-002: write() then read() returns the Oid
    #[test]
    fn test_write_read() {
        let temp = TempDir::new().unwrap();
        let head = HeadRef::new(temp.path().join("HEAD"));
        let oid = Oid::hash(b"commit");

        head.write(&oid).unwrap();
        assert_eq!(head.read().unwrap(), Some(oid));
        assert_eq!(fs::read_to_string(head.path()).unwrap(), oid.to_hex());
    }

    // HD-003: Trailing newline is tolerated
    #[test]
    fn test_read_trims() {
        let temp = TempDir::new().unwrap();
        let head = HeadRef::new(temp.path().join("HEAD"));
        let oid = Oid::hash(b"commit");

        fs::write(head.path(), format!("{}\n", oid)).unwrap();
        assert_eq!(head.read().unwrap(), Some(oid));
    }

    // HD-004: Garbage in HEAD is reported
    #[test]
    fn test_read_invalid() {
        let temp = TempDir::new().unwrap();
        let head = HeadRef::new(temp.path().join("HEAD"));

        fs::write(head.path(), "ref: refs/heads/main").unwrap();
        assert!(matches!(head.read(), Err(Error::InvalidObject { .. })));
    }
}
