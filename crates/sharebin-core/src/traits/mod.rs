//! Shared trait definitions.

pub mod storage;

pub use storage::{ByteStream, StorageProvider};
