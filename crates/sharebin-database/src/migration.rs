//! Schema migration runner.
//!
//! Migrations live in the workspace-level `migrations/` directory and
//! are embedded at compile time; the server applies any pending ones
//! on startup before accepting traffic.

use sqlx::PgPool;
use tracing::info;

use sharebin_core::error::{AppError, ErrorKind};

/// Applies any pending schema migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    info!("Applying pending schema migrations");

    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Schema migration failed: {e}"),
                e,
            )
        })?;

    info!("Schema is up to date");
    Ok(())
}
