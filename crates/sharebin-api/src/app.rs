//! Application builder — wires services, router, and state into an
//! Axum app and runs the server.

use std::sync::Arc;

use axum::Router;
use tracing::info;

use sharebin_auth::Authenticator;
use sharebin_core::config::AppConfig;
use sharebin_core::error::AppError;
use sharebin_database::connection::DatabasePool;
use sharebin_database::repositories::file::PgFileStore;
use sharebin_database::repositories::user::PgUserStore;
use sharebin_database::{FileStore, UserStore};
use sharebin_service::{AccessGate, DownloadService, FileService, StatsService, UploadService};
use sharebin_storage::LocalStorageProvider;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application from a ready state.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Builds the application state from the given stores and storage
/// provider. Shared by the server and by tests running against the
/// in-memory stores.
pub fn build_state(
    config: AppConfig,
    db: Option<DatabasePool>,
    users: Arc<dyn UserStore>,
    files: Arc<dyn FileStore>,
    storage: Arc<dyn sharebin_core::traits::storage::StorageProvider>,
) -> AppState {
    let authenticator = Arc::new(Authenticator::new(users, &config.auth));
    let uploads = Arc::new(UploadService::new(files.clone(), storage.clone()));
    let gate = Arc::new(AccessGate::new(files.clone()));
    let downloads = Arc::new(DownloadService::new(files.clone(), storage.clone()));
    let file_service = Arc::new(FileService::new(files.clone(), storage));
    let stats = Arc::new(StatsService::new(files));

    AppState {
        config: Arc::new(config),
        db,
        authenticator,
        uploads,
        gate,
        downloads,
        files: file_service,
        stats,
    }
}

/// Runs the ShareBin server with the given configuration and pool.
pub async fn run_server(config: AppConfig, db: DatabasePool) -> Result<(), AppError> {
    info!("Starting ShareBin server");

    let storage = Arc::new(LocalStorageProvider::new(&config.storage.root_path).await?);
    let users: Arc<dyn UserStore> = Arc::new(PgUserStore::new(db.pool().clone()));
    let files: Arc<dyn FileStore> = Arc::new(PgFileStore::new(db.pool().clone()));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = build_state(config, Some(db), users, files, storage);
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!("ShareBin server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
    }
}
