//! Object ID (content hash) representation.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{Error, Result};
use crate::infra::hash::{hash_content, DIGEST_SIZE};

/// The length of an object ID in bytes.
pub const OID_BYTES: usize = DIGEST_SIZE;

/// The length of an object ID as a hexadecimal string.
pub const OID_HEX_LEN: usize = OID_BYTES * 2;

/// An object ID: the SHA-256 digest of an object's bytes.
///
/// Blobs and commits are both named by an `Oid`; nothing in the ID itself
/// says which kind of object it refers to.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Oid {
    bytes: [u8; OID_BYTES],
}

impl Oid {
    /// Computes the ID that `content` is stored under.
    ///
    /// # Examples
    ///
    /// ```
    /// use groot::objects::Oid;
    ///
    /// assert_eq!(Oid::hash(b"hello"), Oid::hash(b"hello"));
    /// assert_ne!(Oid::hash(b"hello"), Oid::hash(b"hello world"));
    /// ```
    pub fn hash(content: &[u8]) -> Self {
        Oid {
            bytes: hash_content(content),
        }
    }

    /// Creates an Oid from a 64-character hexadecimal string.
    ///
    /// Upper- and lowercase digits are accepted; anything else, or the
    /// wrong length, yields `Error::InvalidOid`.
    pub fn from_hex(hex: &str) -> Result<Self> {
        if hex.len() != OID_HEX_LEN {
            return Err(Error::InvalidOid(hex.to_string()));
        }

        let mut bytes = [0u8; OID_BYTES];
        hex::decode_to_slice(hex, &mut bytes).map_err(|_| Error::InvalidOid(hex.to_string()))?;

        Ok(Oid { bytes })
    }

    /// Creates an Oid from raw digest bytes.
    pub fn from_bytes(bytes: [u8; OID_BYTES]) -> Self {
        Oid { bytes }
    }

    /// Returns the lowercase hexadecimal representation of this Oid.
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    /// Returns a short (7-character) hexadecimal representation of this Oid.
    pub fn short(&self) -> String {
        self.to_hex()[..7].to_string()
    }

    /// Returns a reference to the raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; OID_BYTES] {
        &self.bytes
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Oid({})", self.short())
    }
}

impl FromStr for Oid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Oid::from_hex(s)
    }
}

impl Serialize for Oid {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Oid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Oid::from_hex(&hex).map_err(de::Error::custom)
    }
}
