//! Shared value types.

pub mod expiry;

pub use expiry::ExpiryPolicy;
