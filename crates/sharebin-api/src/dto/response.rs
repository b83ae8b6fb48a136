//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sharebin_entity::{OwnerStats, User};

/// Generic success envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Always `true`; errors use [`crate::error::ApiErrorResponse`].
    pub success: bool,
    /// The payload.
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Wraps a payload in the success envelope.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Plain message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}

/// Public view of a user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Avatar URL or identicon seed.
    pub profile_image: Option<String>,
    /// Account creation time.
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            profile_image: user.profile_image.clone(),
            created_at: user.created_at,
        }
    }
}

/// Response for register and login: token plus the account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Bearer token for the session.
    pub token: String,
    /// The authenticated account.
    pub user: UserResponse,
}

/// Per-user usage statistics response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    /// Count of all uploads ever made.
    pub total_uploads: i64,
    /// Sum of download counters across all uploads.
    pub total_downloads: i64,
    /// Count of currently retrievable uploads.
    pub active_files: i64,
    /// Human-readable total of bytes currently stored.
    pub storage_used: String,
}

impl From<OwnerStats> for StatsResponse {
    fn from(stats: OwnerStats) -> Self {
        Self {
            total_uploads: stats.total_uploads,
            total_downloads: stats.total_downloads,
            active_files: stats.active_objects,
            storage_used: format_bytes(stats.bytes_stored),
        }
    }
}

/// Formats a byte count as a human-readable decimal string.
pub fn format_bytes(bytes: i64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    if bytes <= 0 {
        return "0 B".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.2} {}", UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(-5), "0 B");
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1024), "1.00 KB");
        assert_eq!(format_bytes(1536), "1.50 KB");
        assert_eq!(format_bytes(1024 * 1024), "1.00 MB");
        assert_eq!(format_bytes(5 * 1024 * 1024 * 1024), "5.00 GB");
    }

    #[test]
    fn test_stats_response_uses_human_readable_storage() {
        let response = StatsResponse::from(OwnerStats {
            total_uploads: 3,
            total_downloads: 7,
            active_objects: 2,
            bytes_stored: 2048,
        });
        assert_eq!(response.active_files, 2);
        assert_eq!(response.storage_used, "2.00 KB");
    }
}
