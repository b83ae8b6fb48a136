//! # sharebin-api
//!
//! HTTP API layer for ShareBin built on Axum.
//!
//! Provides the REST endpoints, the authenticated-user extractor,
//! request/response DTOs, and the mapping from domain errors to HTTP
//! status codes.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use state::AppState;
