//! Application state shared across all handlers.

use std::sync::Arc;

use sharebin_auth::Authenticator;
use sharebin_core::config::AppConfig;
use sharebin_database::connection::DatabasePool;
use sharebin_service::{AccessGate, DownloadService, FileService, StatsService, UploadService};

/// Application state passed to every Axum handler via `State<AppState>`.
///
/// All fields are `Arc`-wrapped for cheap cloning across tasks. The
/// pool is optional so the full router can be stood up against the
/// in-memory stores, with no database behind it.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL pool, when the server runs against Postgres.
    pub db: Option<DatabasePool>,
    /// Credential verification and token minting.
    pub authenticator: Arc<Authenticator>,
    /// Upload pipeline.
    pub uploads: Arc<UploadService>,
    /// Retrieval access gate.
    pub gate: Arc<AccessGate>,
    /// Download pipeline.
    pub downloads: Arc<DownloadService>,
    /// Metadata reads and owner-scoped management.
    pub files: Arc<FileService>,
    /// Usage statistics aggregation.
    pub stats: Arc<StatsService>,
}
