//! Owner-facing file management.

use std::sync::Arc;

use tracing::{info, warn};

use sharebin_core::error::AppError;
use sharebin_core::traits::storage::StorageProvider;
use sharebin_database::FileStore;
use sharebin_entity::FileInfo;

use crate::context::RequestContext;
use crate::file::access::AccessGate;

/// Metadata reads and owner-scoped management of stored objects.
#[derive(Debug, Clone)]
pub struct FileService {
    files: Arc<dyn FileStore>,
    storage: Arc<dyn StorageProvider>,
    gate: AccessGate,
}

impl FileService {
    /// Creates a new file service.
    pub fn new(files: Arc<dyn FileStore>, storage: Arc<dyn StorageProvider>) -> Self {
        let gate = AccessGate::new(files.clone());
        Self {
            files,
            storage,
            gate,
        }
    }

    /// Public metadata for a visible object.
    ///
    /// Never touches the password gate and never changes any counter;
    /// callers can poll it freely before attempting a download.
    pub async fn info(&self, external_id: &str) -> Result<FileInfo, AppError> {
        let record = self.gate.find_visible(external_id).await?;
        Ok(FileInfo::from(&record))
    }

    /// Lists the caller's own visible uploads, newest first.
    pub async fn list_owned(&self, ctx: &RequestContext) -> Result<Vec<FileInfo>, AppError> {
        let records = self.files.list_visible_by_owner(ctx.user_id).await?;
        Ok(records.iter().map(FileInfo::from).collect())
    }

    /// Deletes one of the caller's objects: the metadata record first,
    /// then the stored bytes.
    ///
    /// Anyone other than the owner gets `Unauthorized`, even with a
    /// valid session. Byte removal is best-effort; once the record is
    /// gone the object is unreachable either way.
    pub async fn delete(&self, ctx: &RequestContext, external_id: &str) -> Result<(), AppError> {
        let record = self.gate.find_visible(external_id).await?;

        if record.owner_id != ctx.user_id {
            return Err(AppError::unauthorized("Not authorized"));
        }

        self.files.delete(record.id).await?;
        if let Err(e) = self.storage.delete(&record.storage_path).await {
            warn!(
                external_id = %record.external_id,
                path = %record.storage_path,
                error = %e,
                "Record deleted but byte removal failed"
            );
        }

        info!(owner_id = %ctx.user_id, external_id = %record.external_id, "File deleted");
        Ok(())
    }
}
