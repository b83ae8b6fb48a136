//! Health check handler.

use axum::Json;
use axum::extract::State;
use serde_json::json;

use crate::state::AppState;

/// GET /api/health — liveness plus database reachability when a pool
/// is attached. No auth.
pub async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    let database = match &state.db {
        Some(db) => match db.health_check().await {
            Ok(true) => "ok",
            _ => "unreachable",
        },
        None => "disabled",
    };

    Json(json!({
        "status": "ok",
        "database": database,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
