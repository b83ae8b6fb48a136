//! Storage provider trait for pluggable byte storage backends.

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;

use crate::result::AppResult;

/// A byte stream type used for moving file contents.
///
/// Both the inbound (upload) and outbound (download) directions use
/// this type so that payloads pass through the pipeline chunk by chunk
/// and are never fully buffered in memory.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// Trait for byte storage backends.
///
/// The trait is defined here in `sharebin-core` and implemented in
/// `sharebin-storage`. The metadata store records an opaque path
/// handle; how the bytes are laid out behind that handle is entirely
/// the provider's concern.
#[async_trait]
pub trait StorageProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local").
    fn provider_type(&self) -> &str;

    /// Open a file and return its byte stream.
    ///
    /// Fails with a `NotFound`-kinded error when no bytes exist at the
    /// path; callers decide how to surface that.
    async fn read(&self, path: &str) -> AppResult<ByteStream>;

    /// Write a byte stream to the given path, returning the number of
    /// bytes written. If the stream yields an error partway, the
    /// partial file is removed before the error is returned.
    async fn write_stream(&self, path: &str, stream: ByteStream) -> AppResult<u64>;

    /// Delete the file at the given path. Deleting a missing path is
    /// not an error.
    async fn delete(&self, path: &str) -> AppResult<()>;

    /// Check whether bytes exist at the given path.
    async fn exists(&self, path: &str) -> AppResult<bool>;

    /// Return the byte size of the file at the given path.
    async fn size(&self, path: &str) -> AppResult<u64>;
}
