//! Content-addressed object store.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::blob::Blob;
use super::commit::Commit;
use super::oid::{Oid, OID_HEX_LEN};
use crate::error::{Error, Result};
use crate::infra::{read_file, write_file_atomic};

/// A flat, content-addressed store of objects.
///
/// Every object lives in its own file named after the hex form of its
/// [`Oid`], directly under the objects directory (`.groot/objects/<oid>`).
/// Objects are stored uncompressed and are never deleted.
#[derive(Debug, Clone)]
pub struct ObjectStore {
    /// Path to the objects directory (e.g., `.groot/objects`).
    objects_dir: PathBuf,
}

impl ObjectStore {
    /// Creates an ObjectStore over the given objects directory.
    pub fn new<P: AsRef<Path>>(objects_dir: P) -> Self {
        ObjectStore {
            objects_dir: objects_dir.as_ref().to_path_buf(),
        }
    }

    /// Returns the path of the file holding `oid`.
    pub fn object_path(&self, oid: &Oid) -> PathBuf {
        self.objects_dir.join(oid.to_hex())
    }

    /// Stores `content` and returns its Oid.
    ///
    /// Writing content that is already present is a no-op that returns the
    /// same Oid.
    pub fn put(&self, content: &[u8]) -> Result<Oid> {
        let oid = Oid::hash(content);

        let path = self.object_path(&oid);
        if path.exists() {
            debug!(oid = %oid.short(), "object already stored");
            return Ok(oid);
        }

        write_file_atomic(&path, content)?;
        debug!(oid = %oid.short(), size = content.len(), "stored object");

        Ok(oid)
    }

    /// Reads the bytes of the object named by `oid`.
    ///
    /// # Errors
    ///
    /// `Error::ObjectNotFound` if no such object exists.
    pub fn get(&self, oid: &Oid) -> Result<Vec<u8>> {
        read_file(self.object_path(oid)).map_err(|e| {
            if matches!(e, Error::PathNotFound(_)) {
                Error::ObjectNotFound(oid.to_hex())
            } else {
                e
            }
        })
    }

    /// Reads the object named by `oid` as a blob.
    pub fn read_blob(&self, oid: &Oid) -> Result<Blob> {
        Ok(Blob::new(*oid, self.get(oid)?))
    }

    /// Reads the object named by `oid` as a commit.
    ///
    /// # Errors
    ///
    /// `Error::ObjectNotFound` if no such object exists, or
    /// `Error::InvalidObject` if the object is not a commit.
    pub fn read_commit(&self, oid: &Oid) -> Result<Commit> {
        let data = self.get(oid)?;
        Commit::parse(*oid, &data)
    }

    /// Checks if an object exists in the store.
    pub fn exists(&self, oid: &Oid) -> bool {
        self.object_path(oid).is_file()
    }

    /// Finds objects whose Oid starts with the given hex prefix.
    ///
    /// The prefix must be at least 4 and at most 64 hex characters.
    pub fn find_objects_by_prefix(&self, prefix: &str) -> Result<Vec<Oid>> {
        if prefix.len() < 4 || prefix.len() > OID_HEX_LEN {
            return Err(Error::InvalidOid(prefix.to_string()));
        }

        if !prefix.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidOid(prefix.to_string()));
        }

        let prefix = prefix.to_lowercase();
        let mut matches: Vec<Oid> = self
            .oids()?
            .into_iter()
            .filter(|oid| oid.to_hex().starts_with(&prefix))
            .collect();
        matches.sort();

        Ok(matches)
    }

    /// Returns the number of stored objects.
    pub fn len(&self) -> Result<usize> {
        Ok(self.oids()?.len())
    }

    /// Returns true if the store holds no objects.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Lists every object in the store, skipping stray files.
    fn oids(&self) -> Result<Vec<Oid>> {
        if !self.objects_dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut oids = Vec::new();
        for entry in fs::read_dir(&self.objects_dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name.len() == OID_HEX_LEN {
                if let Ok(oid) = Oid::from_hex(&name) {
                    oids.push(oid);
                }
            }
        }

        Ok(oids)
    }
}
