//! Local filesystem storage provider.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use futures::stream::StreamExt;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio_util::io::ReaderStream;
use tracing::debug;

use sharebin_core::error::{AppError, ErrorKind};
use sharebin_core::result::AppResult;
use sharebin_core::traits::storage::{ByteStream, StorageProvider};

/// Local filesystem storage provider.
#[derive(Debug, Clone)]
pub struct LocalStorageProvider {
    /// Root directory for all stored objects.
    root: PathBuf,
}

impl LocalStorageProvider {
    /// Create a new local storage provider rooted at the given path.
    pub async fn new(root_path: &str) -> AppResult<Self> {
        let root = PathBuf::from(root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create storage root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self { root })
    }

    /// Resolve a relative path handle to an absolute path within the root.
    fn resolve(&self, path: &str) -> PathBuf {
        let clean = path.trim_start_matches('/');
        self.root.join(clean)
    }

    /// Ensure the parent directory of a path exists.
    async fn ensure_parent(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create parent directory: {}", parent.display()),
                    e,
                )
            })?;
        }
        Ok(())
    }
}

#[async_trait]
impl StorageProvider for LocalStorageProvider {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn read(&self, path: &str) -> AppResult<ByteStream> {
        let full_path = self.resolve(path);
        let file = fs::File::open(&full_path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::not_found("Stored object not found")
            } else {
                AppError::with_source(ErrorKind::Storage, "Failed to open stored object", e)
            }
        })?;

        let stream = ReaderStream::new(file);
        Ok(Box::pin(stream))
    }

    async fn write_stream(&self, path: &str, mut stream: ByteStream) -> AppResult<u64> {
        let full_path = self.resolve(path);
        self.ensure_parent(&full_path).await?;

        let mut file = fs::File::create(&full_path).await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Failed to create object file", e)
        })?;

        let mut total_bytes = 0u64;
        let result: AppResult<()> = async {
            while let Some(chunk) = stream.next().await {
                let chunk = chunk.map_err(|e| {
                    AppError::with_source(ErrorKind::Storage, "Upload stream aborted", e)
                })?;
                total_bytes += chunk.len() as u64;
                file.write_all(&chunk).await.map_err(|e| {
                    AppError::with_source(ErrorKind::Storage, "Failed to write chunk", e)
                })?;
            }
            file.flush()
                .await
                .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to flush file", e))
        }
        .await;

        if let Err(e) = result {
            // All-or-nothing: a half-written object must not survive.
            drop(file);
            let _ = fs::remove_file(&full_path).await;
            return Err(e);
        }

        debug!(path, bytes = total_bytes, "Wrote object from stream");
        Ok(total_bytes)
    }

    async fn delete(&self, path: &str) -> AppResult<()> {
        let full_path = self.resolve(path);
        match fs::remove_file(&full_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                "Failed to delete stored object",
                e,
            )),
        }
    }

    async fn exists(&self, path: &str) -> AppResult<bool> {
        Ok(self.resolve(path).exists())
    }

    async fn size(&self, path: &str) -> AppResult<u64> {
        let full_path = self.resolve(path);
        let meta = fs::metadata(&full_path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::not_found("Stored object not found")
            } else {
                AppError::with_source(ErrorKind::Storage, "Failed to stat stored object", e)
            }
        })?;
        Ok(meta.len())
    }
}
