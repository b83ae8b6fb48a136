//! # sharebin-service
//!
//! Business logic for ShareBin: the upload pipeline, the access gate,
//! the download pipeline, file management, and the stats aggregator.
//! Services orchestrate the stores and the storage provider; they hold
//! no per-request state of their own. The authenticated caller is
//! always threaded in explicitly via [`context::RequestContext`].

pub mod context;
pub mod file;
pub mod stats;

pub use context::RequestContext;
pub use file::access::AccessGate;
pub use file::download::{DownloadService, DownloadStream};
pub use file::service::FileService;
pub use file::upload::{StagedUpload, UploadOptions, UploadService};
pub use stats::StatsService;
