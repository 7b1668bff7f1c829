//! # Members Route
//!
//! `GET /members` lists the members shown in the guild's Discord widget.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use deltaco_community_client::{CommunityApiError, DiscordMember};

use crate::error::AppError;
use crate::state::AppState;

/// Build the members router.
pub fn router() -> Router<AppState> {
    Router::new().route("/members", get(list_members))
}

fn map_widget_error(err: CommunityApiError) -> AppError {
    let message = match &err {
        CommunityApiError::NotConfigured(msg) => return AppError::service_unavailable(*msg),
        CommunityApiError::ApiError { status, .. } => {
            format!("Failed to fetch members from Discord: {status}")
        }
        CommunityApiError::InvalidResponse { .. } => {
            "Invalid data structure received from Discord API".to_string()
        }
        _ => "Failed to fetch members from Discord".to_string(),
    };
    tracing::warn!(error = %err, "Discord widget lookup failed");
    AppError::upstream(StatusCode::BAD_GATEWAY, message)
}

/// GET /members: widget members mapped to `{id, name, avatar, status}`.
#[utoipa::path(
    get,
    path = "/members",
    responses(
        (status = 200, description = "Widget members", body = Vec<DiscordMember>),
        (status = 502, description = "Widget unavailable or malformed", body = crate::error::ErrorBody),
        (status = 503, description = "Widget URL not configured", body = crate::error::ErrorBody),
    ),
    tag = "community"
)]
async fn list_members(State(state): State<AppState>) -> Result<Json<Vec<DiscordMember>>, AppError> {
    let members = state
        .community
        .members()
        .members()
        .await
        .map_err(map_widget_error)?;
    Ok(Json(members))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::routes::test_support::state_with_upstream;

    async fn get_members(upstream: &MockServer) -> (StatusCode, serde_json::Value) {
        let tmp = tempfile::tempdir().unwrap();
        let app = router().with_state(state_with_upstream(tmp.path(), &upstream.uri(), &[]));
        let resp = app
            .oneshot(Request::get("/members").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn widget_members_are_mapped() {
        let upstream = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/widget.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "members": [{"id": "0", "username": "Rook", "avatar_url": "https://cdn/r.png", "status": "idle"}]
            })))
            .mount(&upstream)
            .await;

        let (status, body) = get_members(&upstream).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            serde_json::json!([{"id": "0", "name": "Rook", "avatar": "https://cdn/r.png", "status": "idle"}])
        );
    }

    #[tokio::test]
    async fn malformed_widget_is_reported() {
        let upstream = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/widget.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"members": 3})))
            .mount(&upstream)
            .await;

        let (status, body) = get_members(&upstream).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(
            body["error"]["message"],
            "Invalid data structure received from Discord API"
        );
    }

    #[test]
    fn unconfigured_widget_is_unavailable() {
        let err = map_widget_error(CommunityApiError::NotConfigured(
            "Discord widget URL is not defined.",
        ));
        assert!(matches!(err, AppError::ServiceUnavailable(ref m) if m == "Discord widget URL is not defined."));
    }
}
