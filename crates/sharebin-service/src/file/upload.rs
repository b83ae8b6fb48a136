//! The upload pipeline.

use std::sync::Arc;

use tracing::{info, warn};

use sharebin_auth::PasswordHasher;
use sharebin_core::error::{AppError, ErrorKind};
use sharebin_core::traits::storage::{ByteStream, StorageProvider};
use sharebin_core::types::ExpiryPolicy;
use sharebin_database::FileStore;
use sharebin_entity::{CreateFileRecord, FileSummary};

use crate::context::RequestContext;

/// How often to retry metadata creation on an external-id collision
/// before giving up.
const MAX_ID_ATTEMPTS: usize = 4;

/// Per-upload options supplied by the caller.
#[derive(Debug, Clone, Default)]
pub struct UploadOptions {
    /// Expiry policy, resolved to an absolute timestamp at upload time.
    pub expiry: ExpiryPolicy,
    /// Optional retrieval password. Empty strings mean "no gate".
    pub password: Option<String>,
}

/// Payload bytes parked in storage while the rest of the request is
/// still being read. No metadata record references them yet; they
/// become visible only through [`UploadService::commit`].
#[derive(Debug)]
pub struct StagedUpload {
    storage_path: String,
    size_bytes: u64,
}

/// Accepts inbound byte streams and creates metadata records.
#[derive(Debug, Clone)]
pub struct UploadService {
    files: Arc<dyn FileStore>,
    storage: Arc<dyn StorageProvider>,
    hasher: PasswordHasher,
}

impl UploadService {
    /// Creates a new upload service.
    pub fn new(files: Arc<dyn FileStore>, storage: Arc<dyn StorageProvider>) -> Self {
        Self {
            files,
            storage,
            hasher: PasswordHasher::new(),
        }
    }

    /// Accepts an upload: streams the payload to storage, then creates
    /// the metadata record stamped with the caller as owner.
    ///
    /// Convenience for callers that already hold every option when the
    /// stream starts; equivalent to [`stage`](Self::stage) followed by
    /// [`commit`](Self::commit).
    pub async fn accept(
        &self,
        ctx: &RequestContext,
        stream: ByteStream,
        declared_name: &str,
        mime_type: &str,
        options: UploadOptions,
    ) -> Result<FileSummary, AppError> {
        if declared_name.trim().is_empty() {
            return Err(AppError::validation("No file uploaded"));
        }
        let staged = self.stage(stream).await?;
        self.commit(ctx, staged, declared_name, mime_type, options).await
    }

    /// Streams the payload into storage under a fresh internal handle.
    ///
    /// The recorded size is measured from the stream, never taken from
    /// the caller. If the stream fails partway the partial bytes are
    /// removed and no stage is returned. Options arriving after the
    /// payload (multipart fields trailing the file part) can still be
    /// applied later via [`commit`](Self::commit); callers that bail
    /// out must [`discard`](Self::discard) the stage.
    pub async fn stage(&self, stream: ByteStream) -> Result<StagedUpload, AppError> {
        // Bytes are keyed by a fresh internal handle, not the external
        // id, so id regeneration during commit never rewrites them.
        let storage_path = format!("objects/{}", uuid::Uuid::new_v4());
        let size_bytes = self.storage.write_stream(&storage_path, stream).await?;
        Ok(StagedUpload {
            storage_path,
            size_bytes,
        })
    }

    /// Removes staged bytes that will never be committed.
    pub async fn discard(&self, staged: StagedUpload) {
        if let Err(e) = self.storage.delete(&staged.storage_path).await {
            warn!(
                path = %staged.storage_path,
                error = %e,
                "Failed to remove staged bytes"
            );
        }
    }

    /// Creates the metadata record for previously staged bytes,
    /// making the object visible under a fresh external id.
    ///
    /// Upload stays all-or-nothing: any failure here removes the
    /// staged bytes before the error propagates.
    pub async fn commit(
        &self,
        ctx: &RequestContext,
        staged: StagedUpload,
        declared_name: &str,
        mime_type: &str,
        options: UploadOptions,
    ) -> Result<FileSummary, AppError> {
        match self
            .create_record(ctx, &staged, declared_name, mime_type, options)
            .await
        {
            Ok(summary) => Ok(summary),
            Err(e) => {
                self.discard(staged).await;
                Err(e)
            }
        }
    }

    async fn create_record(
        &self,
        ctx: &RequestContext,
        staged: &StagedUpload,
        declared_name: &str,
        mime_type: &str,
        options: UploadOptions,
    ) -> Result<FileSummary, AppError> {
        if declared_name.trim().is_empty() {
            return Err(AppError::validation("No file uploaded"));
        }

        let password_hash = match options.password.as_deref() {
            Some(password) if !password.is_empty() => Some(self.hasher.hash(password)?),
            _ => None,
        };
        let expires_at = options.expiry.resolve();

        let mut data = CreateFileRecord {
            external_id: super::external_id::generate(),
            original_name: declared_name.to_string(),
            storage_path: staged.storage_path.clone(),
            size_bytes: staged.size_bytes as i64,
            mime_type: mime_type.to_string(),
            owner_id: ctx.user_id,
            password_hash,
            expires_at,
        };

        let mut attempts = 0;
        loop {
            match self.files.create(&data).await {
                Ok(record) => {
                    info!(
                        owner_id = %ctx.user_id,
                        external_id = %record.external_id,
                        size = record.size_bytes,
                        "Upload completed"
                    );
                    return Ok(FileSummary::from(&record));
                }
                Err(e) if e.kind == ErrorKind::Conflict && attempts < MAX_ID_ATTEMPTS => {
                    attempts += 1;
                    warn!(attempts, "External id collision, regenerating");
                    data.external_id = super::external_id::generate();
                }
                Err(e) => return Err(e),
            }
        }
    }
}
