//! Outward-facing views of file records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::model::FileRecord;

/// Summary returned to the uploader when an upload completes.
///
/// Carries only what the uploader needs to share the object; never the
/// storage handle or any hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileSummary {
    /// The opaque shareable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Byte size, measured from the stream.
    pub size: i64,
    /// Absolute expiry, if any.
    pub expires_at: Option<DateTime<Utc>>,
    /// Whether retrieval is password-gated.
    pub has_password: bool,
}

impl From<&FileRecord> for FileSummary {
    fn from(record: &FileRecord) -> Self {
        Self {
            id: record.external_id.clone(),
            name: record.original_name.clone(),
            size: record.size_bytes,
            expires_at: record.expires_at,
            has_password: record.has_password(),
        }
    }
}

/// Public metadata for an object, visible to anyone holding its id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileInfo {
    /// The opaque shareable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Byte size.
    pub size: i64,
    /// Content-type label.
    pub mime_type: String,
    /// Number of downloads started.
    pub download_count: i64,
    /// When the object was uploaded.
    pub uploaded_at: DateTime<Utc>,
    /// Absolute expiry, if any.
    pub expires_at: Option<DateTime<Utc>>,
    /// Whether retrieval is password-gated.
    pub has_password: bool,
}

impl From<&FileRecord> for FileInfo {
    fn from(record: &FileRecord) -> Self {
        Self {
            id: record.external_id.clone(),
            name: record.original_name.clone(),
            size: record.size_bytes,
            mime_type: record.mime_type.clone(),
            download_count: record.download_count,
            uploaded_at: record.created_at,
            expires_at: record.expires_at,
            has_password: record.has_password(),
        }
    }
}

/// Per-owner usage totals.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OwnerStats {
    /// Count of all records ever owned, including expired and inactive.
    pub total_uploads: i64,
    /// Sum of download counters across all owned records.
    pub total_downloads: i64,
    /// Count of records that are active and not logically expired.
    pub active_objects: i64,
    /// Byte total over active, non-expired records.
    pub bytes_stored: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_summary_reflects_password_gate() {
        let mut record = FileRecord {
            id: Uuid::new_v4(),
            external_id: "ext".into(),
            original_name: "a.bin".into(),
            storage_path: "objects/a".into(),
            size_bytes: 7,
            mime_type: "application/octet-stream".into(),
            owner_id: Uuid::new_v4(),
            password_hash: None,
            expires_at: None,
            download_count: 0,
            is_active: true,
            created_at: Utc::now(),
        };

        assert!(!FileSummary::from(&record).has_password);
        record.password_hash = Some("hash".into());
        assert!(FileSummary::from(&record).has_password);
    }
}
