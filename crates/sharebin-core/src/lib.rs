//! # sharebin-core
//!
//! Core crate for ShareBin. Contains the unified error system,
//! configuration schemas, the storage provider trait, and shared
//! value types such as the upload expiry policy.
//!
//! This crate has **no** internal dependencies on other ShareBin crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
