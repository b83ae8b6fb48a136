//! In-memory store implementations.
//!
//! Backed by `dashmap` so that uniqueness checks and the download
//! counter keep the same atomicity guarantees as the Postgres stores.
//! Used by the test suite and by single-process development setups.

pub mod file;
pub mod user;

pub use file::MemoryFileStore;
pub use user::MemoryUserStore;
