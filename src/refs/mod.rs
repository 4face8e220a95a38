//! References. There is exactly one: HEAD.

pub mod head;

pub use head::HeadRef;
