//! Request context carrying the authenticated user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sharebin_entity::User;

/// Context for the current authenticated request.
///
/// Produced by the transport layer after token verification and passed
/// into service methods as an explicit parameter, never as ambient
/// state, so every operation knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The user's display name (convenience field).
    pub name: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: Uuid, name: String) -> Self {
        Self {
            user_id,
            name,
            request_time: Utc::now(),
        }
    }
}

impl From<&User> for RequestContext {
    fn from(user: &User) -> Self {
        Self::new(user.id, user.name.clone())
    }
}
