//! The retrieval access gate.

use std::sync::Arc;

use sharebin_auth::PasswordHasher;
use sharebin_core::error::AppError;
use sharebin_database::FileStore;
use sharebin_entity::FileRecord;

/// Decides whether a retrieval request may see an object's bytes.
///
/// Resolution happens in a fixed order: visibility first (expired and
/// unknown ids are indistinguishable), then the password gate. Metadata
/// reads do not pass through the gate; only byte retrieval does.
#[derive(Debug, Clone)]
pub struct AccessGate {
    files: Arc<dyn FileStore>,
    hasher: PasswordHasher,
}

impl AccessGate {
    /// Creates a new access gate over the given store.
    pub fn new(files: Arc<dyn FileStore>) -> Self {
        Self {
            files,
            hasher: PasswordHasher::new(),
        }
    }

    /// Looks up a visible record by external id.
    ///
    /// Expired records answer exactly like absent ones.
    pub async fn find_visible(&self, external_id: &str) -> Result<FileRecord, AppError> {
        self.files
            .find_visible(external_id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))
    }

    /// Resolves a record for byte retrieval, enforcing the password
    /// gate when the record carries one.
    pub async fn resolve(
        &self,
        external_id: &str,
        supplied_password: Option<&str>,
    ) -> Result<FileRecord, AppError> {
        let record = self.find_visible(external_id).await?;

        if let Some(hash) = record.password_hash.as_deref() {
            let supplied = supplied_password.unwrap_or_default();
            if supplied.is_empty() {
                return Err(AppError::password_required());
            }
            if !self.hasher.verify(supplied, hash)? {
                return Err(AppError::invalid_password());
            }
        }

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use sharebin_core::error::ErrorKind;
    use sharebin_database::memory::MemoryFileStore;
    use sharebin_entity::CreateFileRecord;
    use uuid::Uuid;

    fn record(password_hash: Option<String>) -> CreateFileRecord {
        CreateFileRecord {
            external_id: "abcd1234abcd1234abcd1234abcd1234".into(),
            original_name: "a.txt".into(),
            storage_path: "objects/test".into(),
            size_bytes: 3,
            mime_type: "text/plain".into(),
            owner_id: Uuid::new_v4(),
            password_hash,
            expires_at: None,
        }
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let gate = AccessGate::new(Arc::new(MemoryFileStore::new()));
        let err = gate.resolve("nope", None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(err.message, "File not found");
    }

    #[tokio::test]
    async fn test_expired_id_answers_like_unknown() {
        let files = Arc::new(MemoryFileStore::new());
        let mut data = record(None);
        data.expires_at = Some(Utc::now() - Duration::hours(1));
        files.create(&data).await.unwrap();

        let gate = AccessGate::new(files);
        let known = gate.resolve(&record(None).external_id, None).await.unwrap_err();
        let unknown = gate.resolve("nope", None).await.unwrap_err();
        assert_eq!(known.kind, unknown.kind);
        assert_eq!(known.message, unknown.message);
    }

    #[tokio::test]
    async fn test_password_gate_sequence() {
        let hash = PasswordHasher::new().hash("secret").unwrap();
        let files = Arc::new(MemoryFileStore::new());
        let data = record(Some(hash));
        files.create(&data).await.unwrap();
        let gate = AccessGate::new(files);

        let err = gate.resolve(&data.external_id, None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::PasswordRequired);

        let err = gate
            .resolve(&data.external_id, Some("wrong"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidPassword);

        let record = gate.resolve(&data.external_id, Some("secret")).await.unwrap();
        assert_eq!(record.external_id, data.external_id);
    }

    #[tokio::test]
    async fn test_empty_supplied_password_counts_as_missing() {
        let hash = PasswordHasher::new().hash("secret").unwrap();
        let files = Arc::new(MemoryFileStore::new());
        let data = record(Some(hash));
        files.create(&data).await.unwrap();
        let gate = AccessGate::new(files);

        let err = gate.resolve(&data.external_id, Some("")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::PasswordRequired);
    }

    #[tokio::test]
    async fn test_unprotected_record_ignores_supplied_password() {
        let files = Arc::new(MemoryFileStore::new());
        let data = record(None);
        files.create(&data).await.unwrap();
        let gate = AccessGate::new(files);

        assert!(gate.resolve(&data.external_id, Some("anything")).await.is_ok());
    }
}
