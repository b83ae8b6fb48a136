//! # sharebin-entity
//!
//! Domain entity models for ShareBin: users and file records, plus the
//! create/summary companion types that cross crate boundaries.

pub mod file;
pub mod user;

pub use file::{CreateFileRecord, FileInfo, FileRecord, FileSummary, OwnerStats};
pub use user::{CreateUser, User};
