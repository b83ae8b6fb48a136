//! The download pipeline.

use std::sync::Arc;

use tracing::{debug, warn};

use sharebin_core::error::{AppError, ErrorKind};
use sharebin_core::traits::storage::{ByteStream, StorageProvider};
use sharebin_database::FileStore;
use sharebin_entity::FileRecord;

/// An opened download: the byte stream plus the headers the transport
/// layer needs to describe it.
pub struct DownloadStream {
    /// The object's bytes.
    pub stream: ByteStream,
    /// Original filename, for the Content-Disposition header.
    pub name: String,
    /// MIME type recorded at upload.
    pub mime_type: String,
    /// Exact payload length in bytes.
    pub size: i64,
}

impl std::fmt::Debug for DownloadStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadStream")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

/// Opens object byte streams and counts successful deliveries.
#[derive(Debug, Clone)]
pub struct DownloadService {
    files: Arc<dyn FileStore>,
    storage: Arc<dyn StorageProvider>,
}

impl DownloadService {
    /// Creates a new download service.
    pub fn new(files: Arc<dyn FileStore>, storage: Arc<dyn StorageProvider>) -> Self {
        Self { files, storage }
    }

    /// Opens the byte stream for an already-resolved record.
    ///
    /// The counter is bumped once the stream is open, before the first
    /// byte is sent; a client that disconnects mid-transfer still
    /// counts. A record whose bytes are missing from storage reports
    /// `DataMissing`, distinct from an unknown id, and does not count.
    pub async fn open(&self, record: &FileRecord) -> Result<DownloadStream, AppError> {
        let stream = self.storage.read(&record.storage_path).await.map_err(|e| {
            if e.kind == ErrorKind::NotFound {
                warn!(
                    external_id = %record.external_id,
                    path = %record.storage_path,
                    "Metadata present but bytes missing"
                );
                AppError::data_missing("File data not found")
            } else {
                e
            }
        })?;

        let count = self.files.increment_download_count(record.id).await?;
        debug!(external_id = %record.external_id, count, "Download opened");

        Ok(DownloadStream {
            stream,
            name: record.original_name.clone(),
            mime_type: record.mime_type.clone(),
            size: record.size_bytes,
        })
    }
}
