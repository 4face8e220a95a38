//! Infrastructure utilities (hashing, filesystem).

pub mod fs;
pub mod hash;

pub use fs::{read_file, write_file_atomic};
