//! Content hashing for the object store.

use sha2::{Digest, Sha256};

/// Digest size in bytes.
pub const DIGEST_SIZE: usize = 32;

/// Computes the SHA-256 digest of `content`.
///
/// Objects are hashed over their raw bytes with no type header, so blobs
/// and commit records share one identifier space.
pub fn hash_content(content: &[u8]) -> [u8; DIGEST_SIZE] {
    Sha256::digest(content).into()
}
