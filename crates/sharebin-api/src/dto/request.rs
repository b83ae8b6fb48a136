//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name.
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
    /// Email address, the login identifier.
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    /// Account password; length policy is enforced server-side too.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    /// Optional avatar URL; defaults to an identicon seed.
    pub profile_image: Option<String>,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Body for password-gated downloads via POST.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DownloadRequest {
    /// Retrieval password, when the object is gated.
    pub password: Option<String>,
}

/// Query parameters for downloads via GET.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DownloadQuery {
    /// Retrieval password, when the object is gated.
    pub password: Option<String>,
}
