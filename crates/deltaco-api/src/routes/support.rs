//! # Support Route
//!
//! `POST /support` formats a support ticket and posts it to the support
//! channel's Discord webhook.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use deltaco_community_client::{CommunityApiError, SupportTicket};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;
use crate::extractors::extract_json;
use crate::state::AppState;

/// Build the support router.
pub fn router() -> Router<AppState> {
    Router::new().route("/support", post(submit_ticket))
}

/// Acknowledgement for a delivered ticket.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SupportResponse {
    pub message: String,
}

/// A rejected webhook call keeps Discord's status so the form can tell a
/// rate limit from a bad request. Transport failures are internal.
fn map_webhook_error(err: CommunityApiError) -> AppError {
    if let Some(status) = err
        .upstream_status()
        .and_then(|s| StatusCode::from_u16(s).ok())
    {
        tracing::warn!(error = %err, "support webhook rejected ticket");
        return AppError::upstream(status, "Failed to send support request.");
    }
    match err {
        CommunityApiError::NotConfigured(msg) => AppError::service_unavailable(msg),
        other => AppError::Internal(other.to_string()),
    }
}

/// POST /support: deliver a support ticket.
#[utoipa::path(
    post,
    path = "/support",
    request_body = SupportTicket,
    responses(
        (status = 200, description = "Ticket delivered", body = SupportResponse),
        (status = 400, description = "Malformed JSON body", body = crate::error::ErrorBody),
        (status = 503, description = "Webhook not configured", body = crate::error::ErrorBody),
    ),
    tag = "community"
)]
async fn submit_ticket(
    State(state): State<AppState>,
    body: Result<Json<SupportTicket>, JsonRejection>,
) -> Result<Json<SupportResponse>, AppError> {
    let ticket = extract_json(body)?;
    state
        .community
        .support()
        .send_ticket(&ticket)
        .await
        .map_err(map_webhook_error)?;
    tracing::info!(support_type = %ticket.support_type, urgency = %ticket.urgency, "support ticket sent");
    Ok(Json(SupportResponse {
        message: "Support request sent successfully!".to_string(),
    }))
}
