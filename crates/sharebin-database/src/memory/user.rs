//! In-memory user store.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use uuid::Uuid;

use sharebin_core::error::AppError;
use sharebin_core::result::AppResult;
use sharebin_entity::{CreateUser, User};

use crate::repositories::UserStore;

/// User store held entirely in process memory.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: DashMap<Uuid, User>,
    /// Lowercased email -> user id. The entry API makes the uniqueness
    /// check and the reservation a single atomic step.
    by_email: DashMap<String, Uuid>,
}

impl MemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let key = data.email.to_lowercase();
        let id = Uuid::new_v4();

        match self.by_email.entry(key) {
            Entry::Occupied(_) => return Err(AppError::conflict("Email already in use")),
            Entry::Vacant(slot) => {
                slot.insert(id);
            }
        }

        let user = User {
            id,
            name: data.name.clone(),
            email: data.email.clone(),
            password_hash: data.password_hash.clone(),
            profile_image: data.profile_image.clone(),
            created_at: Utc::now(),
        };
        self.users.insert(id, user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let id = self.by_email.get(&email.to_lowercase()).map(|r| *r.value());
        Ok(id.and_then(|id| self.users.get(&id).map(|r| r.value().clone())))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.get(&id).map(|r| r.value().clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sharebin_core::error::ErrorKind;

    fn new_user(email: &str) -> CreateUser {
        CreateUser {
            name: "Test".into(),
            email: email.into(),
            password_hash: "hash".into(),
            profile_image: None,
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts_case_insensitively() {
        let store = MemoryUserStore::new();
        store.create(&new_user("a@example.com")).await.unwrap();

        let err = store.create(&new_user("A@Example.COM")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_find_by_email_is_case_insensitive() {
        let store = MemoryUserStore::new();
        let created = store.create(&new_user("b@example.com")).await.unwrap();

        let found = store.find_by_email("B@EXAMPLE.COM").await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(created.id));
    }
}
