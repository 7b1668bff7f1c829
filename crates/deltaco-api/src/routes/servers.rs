//! # Servers Route
//!
//! `GET /servers` fetches every configured BattleMetrics server and returns
//! the documents as a JSON array, in configured order.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::error::AppError;
use crate::state::AppState;

/// Build the servers router.
pub fn router() -> Router<AppState> {
    Router::new().route("/servers", get(list_servers))
}

/// GET /servers: BattleMetrics documents, passed through untouched.
#[utoipa::path(
    get,
    path = "/servers",
    responses(
        (status = 200, description = "JSON array with one BattleMetrics server document per configured id", content_type = "application/json"),
        (status = 502, description = "Any server lookup failed", body = crate::error::ErrorBody),
    ),
    tag = "community"
)]
async fn list_servers(
    State(state): State<AppState>,
) -> Result<Json<Vec<serde_json::Value>>, AppError> {
    let docs = state.community.servers().servers().await.map_err(|e| {
        tracing::warn!(error = %e, "BattleMetrics lookup failed");
        AppError::upstream(StatusCode::BAD_GATEWAY, "Failed to fetch server data")
    })?;
    Ok(Json(docs))
}
