//! # sharebin-database
//!
//! Persistence layer for ShareBin. Defines the [`UserStore`] and
//! [`FileStore`] traits, the PostgreSQL implementations backing the
//! server, and in-memory implementations used by tests and by
//! single-process development setups.
//!
//! Every cross-request coordination point in the system — email and
//! external-id uniqueness, the download counter — is an atomic
//! single-record operation at this layer.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;

pub use repositories::{FileStore, UserStore};
