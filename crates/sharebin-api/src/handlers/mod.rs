//! HTTP request handlers.

pub mod auth;
pub mod file;
pub mod health;
pub mod stats;
