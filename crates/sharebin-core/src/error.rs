//! Unified application error types for ShareBin.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. The transport layer translates
//! each [`ErrorKind`] into an HTTP status and a safe user-facing message.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The requested resource was not found, or is no longer visible
    /// because its expiry has passed. The two cases are deliberately
    /// indistinguishable to callers.
    NotFound,
    /// The session token is missing, malformed, expired, or the caller
    /// is not allowed to act on the resource.
    Unauthorized,
    /// Login failed. Covers both an unknown email and a wrong password
    /// so that accounts cannot be enumerated.
    InvalidCredentials,
    /// A conflict occurred (duplicate email, duplicate external id).
    Conflict,
    /// The object is password-gated and no password was supplied.
    PasswordRequired,
    /// The supplied object password did not verify.
    InvalidPassword,
    /// A metadata record exists but its backing bytes are gone. This is
    /// a server-side fault, surfaced distinctly from `NotFound`.
    DataMissing,
    /// Input validation failed.
    Validation,
    /// A database error occurred.
    Database,
    /// A storage I/O error occurred.
    Storage,
    /// A configuration error occurred.
    Configuration,
    /// An internal server error occurred.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Unauthorized => write!(f, "UNAUTHORIZED"),
            Self::InvalidCredentials => write!(f, "INVALID_CREDENTIALS"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::PasswordRequired => write!(f, "PASSWORD_REQUIRED"),
            Self::InvalidPassword => write!(f, "INVALID_PASSWORD"),
            Self::DataMissing => write!(f, "DATA_MISSING"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Database => write!(f, "DATABASE"),
            Self::Storage => write!(f, "STORAGE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout ShareBin.
///
/// All crate-specific errors are mapped into `AppError` using `From`
/// impls or explicit `.map_err()` calls so that every operation returns
/// a typed outcome instead of signaling through panics.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message. Must never contain storage
    /// paths, password hashes, or identifiers of other users.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create an unauthorized error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    /// Create an invalid-credentials error.
    pub fn invalid_credentials() -> Self {
        Self::new(ErrorKind::InvalidCredentials, "Invalid credentials")
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create a password-required error.
    pub fn password_required() -> Self {
        Self::new(ErrorKind::PasswordRequired, "Password required")
    }

    /// Create an invalid-password error.
    pub fn invalid_password() -> Self {
        Self::new(ErrorKind::InvalidPassword, "Invalid password")
    }

    /// Create a data-missing error.
    pub fn data_missing(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DataMissing, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Storage, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Internal,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Storage, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_display() {
        assert_eq!(ErrorKind::NotFound.to_string(), "NOT_FOUND");
        assert_eq!(ErrorKind::PasswordRequired.to_string(), "PASSWORD_REQUIRED");
    }

    #[test]
    fn test_invalid_credentials_is_opaque() {
        // The login failure message must not reveal whether the email exists.
        let err = AppError::invalid_credentials();
        assert_eq!(err.message, "Invalid credentials");
        assert_eq!(err.kind, ErrorKind::InvalidCredentials);
    }
}
