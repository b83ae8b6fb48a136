//! Usage statistics handler.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{ApiResponse, StatsResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/files/stats
pub async fn owner_stats(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<StatsResponse>>, ApiError> {
    let stats = state.stats.compute(&auth).await?;
    Ok(Json(ApiResponse::ok(StatsResponse::from(stats))))
}
