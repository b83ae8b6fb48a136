//! Per-owner usage statistics.

use std::sync::Arc;

use sharebin_core::error::AppError;
use sharebin_database::FileStore;
use sharebin_entity::OwnerStats;

use crate::context::RequestContext;

/// Aggregates an owner's usage totals.
///
/// Totals cover every surviving record, expired ones included; only
/// `active_objects` is restricted to records that are both unexpired
/// and flagged active. The store computes the whole aggregate in one
/// consistent read.
#[derive(Debug, Clone)]
pub struct StatsService {
    files: Arc<dyn FileStore>,
}

impl StatsService {
    /// Creates a new stats service.
    pub fn new(files: Arc<dyn FileStore>) -> Self {
        Self { files }
    }

    /// Computes the caller's usage totals.
    pub async fn compute(&self, ctx: &RequestContext) -> Result<OwnerStats, AppError> {
        self.files.owner_stats(ctx.user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use sharebin_database::memory::MemoryFileStore;
    use sharebin_entity::CreateFileRecord;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_expired_records_still_count_toward_totals() {
        let files = Arc::new(MemoryFileStore::new());
        let ctx = RequestContext::new(Uuid::new_v4(), "Alice".into());

        for (external_id, expires_at) in [
            ("aa", None),
            ("bb", Some(Utc::now() - Duration::hours(1))),
        ] {
            files
                .create(&CreateFileRecord {
                    external_id: external_id.into(),
                    original_name: "a.txt".into(),
                    storage_path: format!("objects/{external_id}"),
                    size_bytes: 10,
                    mime_type: "text/plain".into(),
                    owner_id: ctx.user_id,
                    password_hash: None,
                    expires_at,
                })
                .await
                .unwrap();
        }

        let stats = StatsService::new(files).compute(&ctx).await.unwrap();
        assert_eq!(stats.total_uploads, 2);
        assert_eq!(stats.active_objects, 1);
        assert_eq!(stats.bytes_stored, 20);
    }
}
