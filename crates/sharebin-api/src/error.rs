//! Maps domain errors to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use sharebin_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// Transport-layer wrapper for [`AppError`].
///
/// Handlers return `Result<_, ApiError>`; the `?` operator converts
/// from `AppError` automatically.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// The HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self.0.kind {
            ErrorKind::Validation | ErrorKind::InvalidCredentials | ErrorKind::Conflict => {
                StatusCode::BAD_REQUEST
            }
            ErrorKind::Unauthorized
            | ErrorKind::PasswordRequired
            | ErrorKind::InvalidPassword => StatusCode::UNAUTHORIZED,
            ErrorKind::NotFound | ErrorKind::DataMissing => StatusCode::NOT_FOUND,
            ErrorKind::Database
            | ErrorKind::Storage
            | ErrorKind::Configuration
            | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Internal details are logged, never surfaced to the client.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(kind = %self.0.kind, error = %self.0.message, "Request failed");
            "Internal server error".to_string()
        } else {
            self.0.message.clone()
        };

        let body = ApiErrorResponse {
            error: self.0.kind.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        ApiError(err).status()
    }

    #[test]
    fn test_client_errors_map_to_4xx() {
        assert_eq!(
            status_of(AppError::invalid_credentials()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::conflict("Email already in use")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::password_required()),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AppError::invalid_password()),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AppError::not_found("File not found")),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::data_missing("File data not found")),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_infrastructure_errors_are_opaque_500s() {
        let response = ApiError(AppError::database("connection reset")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
