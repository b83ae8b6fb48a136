//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered user in the ShareBin system.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Human-readable display name.
    pub name: String,
    /// Email address. Unique across the system.
    pub email: String,
    /// Argon2id password hash. Never serialized outward.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Profile image reference (URL or identicon seed).
    pub profile_image: Option<String>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Profile image reference (falls back to the email for identicons).
    pub profile_image: Option<String>,
}
