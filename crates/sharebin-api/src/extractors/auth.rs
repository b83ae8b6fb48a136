//! `AuthUser` extractor — validates the session token and injects context.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

use sharebin_core::error::AppError;
use sharebin_service::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Cookie carrying the session token for browser clients.
pub const AUTH_COOKIE: &str = "auth_token";

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Bearer header first, session cookie as the browser fallback.
        let bearer = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::to_string);

        let token = match bearer {
            Some(token) => token,
            None => CookieJar::from_headers(&parts.headers)
                .get(AUTH_COOKIE)
                .map(|c| c.value().to_string())
                .ok_or_else(|| ApiError(AppError::unauthorized("Authentication required")))?,
        };

        let user = state.authenticator.verify(&token).await?;
        Ok(AuthUser(RequestContext::from(&user)))
    }
}
