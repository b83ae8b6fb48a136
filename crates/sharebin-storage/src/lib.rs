//! # sharebin-storage
//!
//! Implementations of the [`StorageProvider`] trait from
//! `sharebin-core`. Currently a local filesystem provider; the metadata
//! layer only ever sees opaque path handles, so swapping in an object
//! store is an implementation change, not an interface change.
//!
//! [`StorageProvider`]: sharebin_core::traits::StorageProvider

pub mod local;

pub use local::LocalStorageProvider;
