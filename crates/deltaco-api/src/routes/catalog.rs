//! # Mod Catalog Routes
//!
//! `GET /catalog` returns the merged listing; `POST /catalog` accepts a
//! `multipart/form-data` submission of either a mod upload or a community
//! link.
//!
//! Store operations touch the filesystem synchronously and run on the
//! blocking pool.

use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::routing::get;
use axum::{Json, Router};
use deltaco_catalog::{CatalogError, CatalogStore};
use deltaco_core::{CatalogListing, EntryKind, ValidationError};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;
use crate::extractors::CatalogUploadForm;
use crate::state::AppState;

/// Build the catalog router. `upload_max_bytes` bounds submission bodies.
pub fn router(upload_max_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/catalog", get(list_catalog).post(submit_entry))
        .layer(DefaultBodyLimit::max(upload_max_bytes))
}

/// Acknowledgement returned for an accepted submission.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    pub message: String,
}

/// Run a store operation on the blocking pool.
async fn blocking<T, F>(store: &CatalogStore, op: F) -> Result<T, AppError>
where
    T: Send + 'static,
    F: FnOnce(CatalogStore) -> Result<T, CatalogError> + Send + 'static,
{
    let store = store.clone();
    tokio::task::spawn_blocking(move || op(store))
        .await
        .map_err(|e| AppError::Internal(format!("catalog task failed: {e}")))?
        .map_err(AppError::from)
}

/// GET /catalog: list landing-zone files merged with their metadata.
#[utoipa::path(
    get,
    path = "/catalog",
    responses(
        (status = 200, description = "Merged catalog listing", body = CatalogListing),
        (status = 500, description = "Catalog document unreadable or corrupt", body = crate::error::ErrorBody),
    ),
    tag = "catalog"
)]
async fn list_catalog(State(state): State<AppState>) -> Result<Json<CatalogListing>, AppError> {
    let listing = blocking(&state.catalog, |store| store.list()).await?;
    Ok(Json(listing))
}

/// POST /catalog: upload a mod or add a community link.
///
/// A mod submission needs `name`, `description`, `version`, `category` and
/// a `file` part; `downloadable` is optional. A community-link submission
/// needs `name`, `description` and `url`.
#[utoipa::path(
    post,
    path = "/catalog",
    request_body(content = CatalogUploadForm, content_type = "multipart/form-data",
        description = "Catalog submission; mods carry the binary in a `file` part"),
    responses(
        (status = 200, description = "Submission stored", body = UploadResponse),
        (status = 400, description = "Unknown or missing `type`", body = crate::error::ErrorBody),
        (status = 413, description = "Body exceeds the upload limit", body = crate::error::ErrorBody),
        (status = 422, description = "Required field missing", body = crate::error::ErrorBody),
        (status = 500, description = "Decode or persist failure", body = crate::error::ErrorBody),
    ),
    tag = "catalog"
)]
async fn submit_entry(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let form = CatalogUploadForm::from_multipart(multipart).await?;

    match form.entry_kind()? {
        EntryKind::CommunityLink => {
            let draft = form.link_draft();
            blocking(&state.catalog, move |store| store.append_community_link(draft)).await?;
        }
        EntryKind::Mod => {
            let draft = form.mod_draft();
            let file = form.file.ok_or(ValidationError::MissingField {
                kind: EntryKind::Mod.as_str(),
                field: "file",
            })?;
            let size = file.bytes.len();
            let stored = blocking(&state.catalog, move |store| {
                store.upload_mod(draft, file.original_name.as_deref(), &file.bytes)
            })
            .await?;
            tracing::info!(file = %stored, size, "mod uploaded");
        }
    }

    Ok(Json(UploadResponse {
        message: "Upload successful".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;
    use crate::routes::test_support::{multipart_body, test_state, BOUNDARY};

    fn app(state: AppState) -> Router {
        router(1024 * 1024).with_state(state)
    }

    fn post(body: Vec<u8>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/catalog")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn json(resp: axum::response::Response) -> serde_json::Value {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn list_on_fresh_store_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let resp = app(test_state(tmp.path()))
            .oneshot(Request::get("/catalog").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            json(resp).await,
            serde_json::json!({"mods": [], "communityLinks": []})
        );
    }

    #[tokio::test]
    async fn community_link_submission_is_listed() {
        let tmp = tempfile::tempdir().unwrap();
        let state = test_state(tmp.path());
        let body = multipart_body(
            &[
                ("type", "community-link"),
                ("name", "Forum"),
                ("description", "Talk"),
                ("url", "https://forum.example"),
            ],
            None,
        );
        let resp = app(state.clone()).oneshot(post(body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(json(resp).await["message"], "Upload successful");

        let listing = state.catalog.list().unwrap();
        assert_eq!(listing.community_links.len(), 1);
        assert_eq!(listing.community_links[0].url, "https://forum.example");
    }

    #[tokio::test]
    async fn mod_without_file_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let body = multipart_body(
            &[
                ("type", "mod"),
                ("name", "n"),
                ("description", "d"),
                ("version", "1"),
                ("category", "c"),
            ],
            None,
        );
        let resp = app(test_state(tmp.path())).oneshot(post(body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = json(resp).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["message"].as_str().unwrap().contains("file"));
    }

    #[tokio::test]
    async fn unknown_type_is_bad_request() {
        let tmp = tempfile::tempdir().unwrap();
        let state = test_state(tmp.path());
        let body = multipart_body(&[("type", "plugin"), ("name", "n")], None);
        let resp = app(state.clone()).oneshot(post(body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(state.catalog.read_catalog().unwrap().mods.len(), 0);
    }

    #[tokio::test]
    async fn non_multipart_body_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let req = Request::builder()
            .method("POST")
            .uri("/catalog")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
            .unwrap();
        let resp = app(test_state(tmp.path())).oneshot(req).await.unwrap();
        assert!(resp.status().is_client_error());
    }
}
