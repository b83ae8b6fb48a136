//! File lifecycle services.

pub mod access;
pub mod download;
pub mod external_id;
pub mod service;
pub mod upload;
