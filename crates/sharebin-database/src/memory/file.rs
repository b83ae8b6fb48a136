//! In-memory file metadata store.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use uuid::Uuid;

use sharebin_core::error::AppError;
use sharebin_core::result::AppResult;
use sharebin_entity::{CreateFileRecord, FileRecord, OwnerStats};

use crate::repositories::FileStore;

/// File metadata store held entirely in process memory.
#[derive(Debug, Default)]
pub struct MemoryFileStore {
    files: DashMap<Uuid, FileRecord>,
    /// External id -> internal id. Entry-based insert keeps the
    /// uniqueness check atomic.
    by_external: DashMap<String, Uuid>,
}

impl MemoryFileStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FileStore for MemoryFileStore {
    async fn create(&self, data: &CreateFileRecord) -> AppResult<FileRecord> {
        let id = Uuid::new_v4();

        match self.by_external.entry(data.external_id.clone()) {
            Entry::Occupied(_) => return Err(AppError::conflict("External id already taken")),
            Entry::Vacant(slot) => {
                slot.insert(id);
            }
        }

        let record = FileRecord {
            id,
            external_id: data.external_id.clone(),
            original_name: data.original_name.clone(),
            storage_path: data.storage_path.clone(),
            size_bytes: data.size_bytes,
            mime_type: data.mime_type.clone(),
            owner_id: data.owner_id,
            password_hash: data.password_hash.clone(),
            expires_at: data.expires_at,
            download_count: 0,
            is_active: true,
            created_at: Utc::now(),
        };
        self.files.insert(id, record.clone());
        Ok(record)
    }

    async fn find_visible(&self, external_id: &str) -> AppResult<Option<FileRecord>> {
        let id = self.by_external.get(external_id).map(|r| *r.value());
        Ok(id
            .and_then(|id| self.files.get(&id).map(|r| r.value().clone()))
            .filter(|rec| !rec.is_expired()))
    }

    async fn increment_download_count(&self, id: Uuid) -> AppResult<i64> {
        // get_mut holds the shard write lock, so the read-modify-write
        // is indivisible with respect to concurrent increments.
        let mut record = self
            .files
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("File record not found"))?;
        record.download_count += 1;
        Ok(record.download_count)
    }

    async fn list_visible_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<FileRecord>> {
        let now = Utc::now();
        let mut records: Vec<FileRecord> = self
            .files
            .iter()
            .filter(|r| r.owner_id == owner_id && !r.is_expired_at(now))
            .map(|r| r.value().clone())
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        match self.files.remove(&id) {
            Some((_, record)) => {
                self.by_external.remove(&record.external_id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn owner_stats(&self, owner_id: Uuid) -> AppResult<OwnerStats> {
        let now = Utc::now();
        let mut stats = OwnerStats::default();
        for record in self.files.iter().filter(|r| r.owner_id == owner_id) {
            stats.total_uploads += 1;
            stats.total_downloads += record.download_count;
            if record.is_active && !record.is_expired_at(now) {
                stats.active_objects += 1;
                stats.bytes_stored += record.size_bytes;
            }
        }
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use sharebin_core::error::ErrorKind;
    use std::sync::Arc;

    fn new_record(external_id: &str, owner_id: Uuid) -> CreateFileRecord {
        CreateFileRecord {
            external_id: external_id.into(),
            original_name: "file.bin".into(),
            storage_path: "objects/x".into(),
            size_bytes: 10,
            mime_type: "application/octet-stream".into(),
            owner_id,
            password_hash: None,
            expires_at: None,
        }
    }

    #[tokio::test]
    async fn test_duplicate_external_id_conflicts() {
        let store = MemoryFileStore::new();
        let owner = Uuid::new_v4();
        store.create(&new_record("dup", owner)).await.unwrap();

        let err = store.create(&new_record("dup", owner)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_expired_record_is_invisible() {
        let store = MemoryFileStore::new();
        let owner = Uuid::new_v4();
        let mut data = new_record("gone", owner);
        data.expires_at = Some(Utc::now() - Duration::seconds(1));
        store.create(&data).await.unwrap();

        assert!(store.find_visible("gone").await.unwrap().is_none());
        assert!(store.list_visible_by_owner(owner).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_increments_are_never_lost() {
        let store = Arc::new(MemoryFileStore::new());
        let owner = Uuid::new_v4();
        let record = store.create(&new_record("ctr", owner)).await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..100 {
            let store = Arc::clone(&store);
            let id = record.id;
            handles.push(tokio::spawn(async move {
                store.increment_download_count(id).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let current = store.find_visible("ctr").await.unwrap().unwrap();
        assert_eq!(current.download_count, 100);
    }

    #[tokio::test]
    async fn test_owner_stats_inclusion_rules() {
        let store = MemoryFileStore::new();
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();

        // Live record with downloads.
        let mut live = new_record("live", owner);
        live.size_bytes = 100;
        let live = store.create(&live).await.unwrap();
        store.increment_download_count(live.id).await.unwrap();
        store.increment_download_count(live.id).await.unwrap();

        // Expired record still counts toward total uploads/downloads.
        let mut expired = new_record("old", owner);
        expired.size_bytes = 50;
        expired.expires_at = Some(Utc::now() - Duration::seconds(1));
        let expired = store.create(&expired).await.unwrap();
        store.increment_download_count(expired.id).await.unwrap();

        // Another owner's record never shows up.
        store.create(&new_record("theirs", other)).await.unwrap();

        let stats = store.owner_stats(owner).await.unwrap();
        assert_eq!(stats.total_uploads, 2);
        assert_eq!(stats.total_downloads, 3);
        assert_eq!(stats.active_objects, 1);
        assert_eq!(stats.bytes_stored, 100);
    }
}
