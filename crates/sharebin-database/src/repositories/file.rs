//! PostgreSQL file metadata store.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use sharebin_core::error::{AppError, ErrorKind};
use sharebin_core::result::AppResult;
use sharebin_entity::{CreateFileRecord, FileRecord, OwnerStats};

use super::FileStore;

/// Predicate shared by every visibility-filtered query.
const NOT_EXPIRED: &str = "(expires_at IS NULL OR expires_at > NOW())";

/// File metadata store backed by the `files` table.
#[derive(Debug, Clone)]
pub struct PgFileStore {
    pool: PgPool,
}

impl PgFileStore {
    /// Create a new file store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileStore for PgFileStore {
    async fn create(&self, data: &CreateFileRecord) -> AppResult<FileRecord> {
        sqlx::query_as::<_, FileRecord>(
            "INSERT INTO files \
             (id, external_id, original_name, storage_path, size_bytes, mime_type, \
              owner_id, password_hash, expires_at) \
             VALUES (gen_random_uuid(), $1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING *",
        )
        .bind(&data.external_id)
        .bind(&data.original_name)
        .bind(&data.storage_path)
        .bind(data.size_bytes)
        .bind(&data.mime_type)
        .bind(data.owner_id)
        .bind(&data.password_hash)
        .bind(data.expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("files_external_id_key") =>
            {
                AppError::conflict("External id already taken")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create file record", e),
        })
    }

    async fn find_visible(&self, external_id: &str) -> AppResult<Option<FileRecord>> {
        sqlx::query_as::<_, FileRecord>(&format!(
            "SELECT * FROM files WHERE external_id = $1 AND {NOT_EXPIRED}"
        ))
        .bind(external_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to look up file", e))
    }

    async fn increment_download_count(&self, id: Uuid) -> AppResult<i64> {
        let row: (i64,) = sqlx::query_as(
            "UPDATE files SET download_count = download_count + 1 \
             WHERE id = $1 RETURNING download_count",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to increment download count", e)
        })?;

        Ok(row.0)
    }

    async fn list_visible_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<FileRecord>> {
        sqlx::query_as::<_, FileRecord>(&format!(
            "SELECT * FROM files WHERE owner_id = $1 AND {NOT_EXPIRED} \
             ORDER BY created_at DESC"
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list files", e))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM files WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete file record", e)
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn owner_stats(&self, owner_id: Uuid) -> AppResult<OwnerStats> {
        let row: (i64, i64, i64, i64) = sqlx::query_as(&format!(
            "SELECT COUNT(*), \
                    COALESCE(SUM(download_count), 0)::BIGINT, \
                    COUNT(*) FILTER (WHERE is_active AND {NOT_EXPIRED}), \
                    COALESCE(SUM(size_bytes) FILTER (WHERE is_active AND {NOT_EXPIRED}), 0)::BIGINT \
             FROM files WHERE owner_id = $1"
        ))
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to compute stats", e))?;

        Ok(OwnerStats {
            total_uploads: row.0,
            total_downloads: row.1,
            active_objects: row.2,
            bytes_stored: row.3,
        })
    }
}
