//! # OpenAPI Specification Assembly
//!
//! Assembles the utoipa-documented routes into one OpenAPI document,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI document for the community API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Delta Co Gaming Community API",
        version = "0.1.0",
        description = "Mod catalog uploads and listing, support tickets, BattleMetrics server status and Discord members for the Delta Co Gaming community site.",
        license(name = "MIT")
    ),
    paths(
        crate::routes::catalog::list_catalog,
        crate::routes::catalog::submit_entry,
        crate::routes::support::submit_ticket,
        crate::routes::servers::list_servers,
        crate::routes::members::list_members,
    ),
    components(schemas(
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        crate::extractors::CatalogUploadForm,
        crate::routes::catalog::UploadResponse,
        crate::routes::support::SupportResponse,
        deltaco_core::CatalogListing,
        deltaco_core::ListedMod,
        deltaco_core::CommunityLink,
        deltaco_community_client::SupportTicket,
        deltaco_community_client::DiscordMember,
    )),
    tags(
        (name = "catalog", description = "Mod catalog"),
        (name = "community", description = "Discord and BattleMetrics proxies"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
