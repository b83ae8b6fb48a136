//! Auth handlers — register, login, current user, logout.

use axum::Json;
use axum::extract::State;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use validator::Validate;

use sharebin_core::error::AppError;

use crate::dto::request::{LoginRequest, RegisterRequest};
use crate::dto::response::{ApiResponse, AuthResponse, MessageResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::auth::AUTH_COOKIE;
use crate::extractors::AuthUser;
use crate::state::AppState;

// Session cookie: expiry is carried inside the token itself, so the
// cookie needs no max-age of its own.
fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<RegisterRequest>,
) -> Result<(CookieJar, Json<ApiResponse<AuthResponse>>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let (token, user) = state
        .authenticator
        .register(&req.name, &req.email, &req.password, req.profile_image)
        .await?;

    let jar = jar.add(session_cookie(token.clone()));
    Ok((
        jar,
        Json(ApiResponse::ok(AuthResponse {
            token,
            user: UserResponse::from(&user),
        })),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<ApiResponse<AuthResponse>>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let (token, user) = state.authenticator.login(&req.email, &req.password).await?;

    let jar = jar.add(session_cookie(token.clone()));
    Ok((
        jar,
        Json(ApiResponse::ok(AuthResponse {
            token,
            user: UserResponse::from(&user),
        })),
    ))
}

/// GET /api/auth/user
pub async fn current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    // The extractor already validated the token; re-resolve so the
    // response reflects the stored account, not the claims snapshot.
    let user = state.authenticator.user(auth.user_id).await?;

    Ok(Json(ApiResponse::ok(UserResponse::from(&user))))
}

/// GET /api/auth/logout
///
/// Tokens are stateless; logout just clears the browser cookie.
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<ApiResponse<MessageResponse>>) {
    let jar = jar.remove(Cookie::build(AUTH_COOKIE).path("/").build());
    (
        jar,
        Json(ApiResponse::ok(MessageResponse {
            message: "Logged out successfully".to_string(),
        })),
    )
}
