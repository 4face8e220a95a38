//! Stored object types (blob, commit) and the object store.
//!
//! Blobs and commits share one flat namespace of [`Oid`]s. A stored object
//! is a commit if its bytes decode as a commit record; otherwise it is only
//! ever read as a blob.

pub mod blob;
pub mod commit;
pub mod oid;
pub mod store;

pub use blob::Blob;
pub use commit::Commit;
pub use oid::Oid;
pub use store::ObjectStore;
