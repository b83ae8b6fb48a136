//! File record entity and its outward-facing views.

pub mod model;
pub mod summary;

pub use model::{CreateFileRecord, FileRecord};
pub use summary::{FileInfo, FileSummary, OwnerStats};
