//! File record entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Metadata record for an uploaded object.
///
/// The record is addressed publicly by `external_id` only; the internal
/// `id` and the `storage_path` handle never leave the server.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FileRecord {
    /// Internal identifier.
    pub id: Uuid,
    /// Opaque, unguessable identifier used in shareable URLs.
    /// Immutable and globally unique for the lifetime of the record.
    pub external_id: String,
    /// Original display name, as declared at upload.
    pub original_name: String,
    /// Storage location handle. Never serialized outward.
    #[serde(skip_serializing)]
    pub storage_path: String,
    /// Byte size, measured from the upload stream.
    pub size_bytes: i64,
    /// Content-type label.
    pub mime_type: String,
    /// The owning user. Immutable after creation.
    pub owner_id: Uuid,
    /// Optional retrieval password, stored as an Argon2id hash.
    /// Never serialized outward.
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    /// Absolute expiry timestamp, if any.
    pub expires_at: Option<DateTime<Utc>>,
    /// Number of downloads started. Only ever increases.
    pub download_count: i64,
    /// Active flag. Expiry visibility overrides this (see [`Self::is_expired`]).
    pub is_active: bool,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl FileRecord {
    /// Whether the record is logically expired at `now`.
    ///
    /// An expired record must be invisible to every lookup, download,
    /// and listing path regardless of `is_active`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|exp| now >= exp)
    }

    /// Whether the record is logically expired right now.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Whether the record has a retrieval password set.
    pub fn has_password(&self) -> bool {
        self.password_hash.is_some()
    }
}

/// Data required to create a new file record.
#[derive(Debug, Clone)]
pub struct CreateFileRecord {
    /// Opaque external identifier.
    pub external_id: String,
    /// Original display name.
    pub original_name: String,
    /// Storage location handle.
    pub storage_path: String,
    /// Measured byte size.
    pub size_bytes: i64,
    /// Content-type label.
    pub mime_type: String,
    /// The owning user.
    pub owner_id: Uuid,
    /// Optional retrieval password hash.
    pub password_hash: Option<String>,
    /// Absolute expiry timestamp, if any.
    pub expires_at: Option<DateTime<Utc>>,
}
