//! Store traits and their PostgreSQL implementations.
//!
//! Services hold `Arc<dyn UserStore>` / `Arc<dyn FileStore>` so that
//! the Postgres-backed stores in this module and the in-memory stores
//! in [`crate::memory`] are interchangeable.

pub mod file;
pub mod user;

use async_trait::async_trait;
use uuid::Uuid;

use sharebin_core::result::AppResult;
use sharebin_entity::{CreateFileRecord, CreateUser, FileRecord, OwnerStats, User};

/// Persistence contract for user identities.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug + 'static {
    /// Create a user. Fails with `Conflict` if the email is already
    /// registered (case-insensitive); enforced atomically at the store.
    async fn create(&self, data: &CreateUser) -> AppResult<User>;

    /// Find a user by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find a user by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;
}

/// Persistence contract for file metadata records.
///
/// Every read path evaluates expiry lazily: a record whose `expires_at`
/// has passed is treated as nonexistent, whatever its `is_active` flag
/// says. Physical cleanup of expired rows is a background concern and
/// not part of this contract.
#[async_trait]
pub trait FileStore: Send + Sync + std::fmt::Debug + 'static {
    /// Create a record. Fails with `Conflict` if the external id is
    /// already taken; callers regenerate the id and retry.
    async fn create(&self, data: &CreateFileRecord) -> AppResult<FileRecord>;

    /// Find a non-expired record by its external id.
    async fn find_visible(&self, external_id: &str) -> AppResult<Option<FileRecord>>;

    /// Atomically add 1 to the download counter and return the new
    /// value. Concurrent callers never lose an increment.
    async fn increment_download_count(&self, id: Uuid) -> AppResult<i64>;

    /// List an owner's non-expired records, newest first.
    async fn list_visible_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<FileRecord>>;

    /// Delete a record by internal id. Returns `true` if a row was removed.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Compute per-owner usage totals in one consistent read.
    async fn owner_stats(&self, owner_id: Uuid) -> AppResult<OwnerStats>;
}
