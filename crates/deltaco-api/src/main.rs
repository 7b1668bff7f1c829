//! # deltaco-api -- Binary Entry Point
//!
//! Reads configuration from the environment, prepares the landing zone and
//! serves the community API. Binds to `PORT` (default 8080).

use deltaco_api::state::{AppConfig, AppState};
use deltaco_catalog::{CatalogConfig, CatalogStore};
use deltaco_community_client::{CommunityApiConfig, CommunityClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();

    let catalog_config = CatalogConfig::from_env().map_err(|e| {
        tracing::error!("Invalid catalog configuration: {e}");
        e
    })?;
    let catalog = CatalogStore::new(catalog_config);
    catalog.initialize().map_err(|e| {
        tracing::error!("Catalog initialization failed: {e}");
        e
    })?;
    tracing::info!(
        landing_zone = %catalog.landing_zone().root().display(),
        write_mode = %catalog.write_mode(),
        "catalog store ready"
    );

    let community_config = CommunityApiConfig::from_env().map_err(|e| {
        tracing::error!("Invalid community upstream configuration: {e}");
        e
    })?;
    if community_config.discord_widget_url.is_none() {
        tracing::warn!("DISCORD_WIDGET_URL not set; /members will return 503");
    }
    if community_config.discord_webhook_url.is_none() {
        tracing::warn!("DISCORD_WEBHOOK_URL not set; /support will return 503");
    }
    let community = CommunityClient::new(community_config)?;

    let mut state = AppState::new(config.clone(), catalog, community);
    match deltaco_api::middleware::metrics::install_recorder() {
        Ok(handle) => state = state.with_metrics(handle),
        Err(e) => tracing::warn!("Prometheus recorder not installed: {e}. /metrics will return 404."),
    }

    let app = deltaco_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Delta Co community API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
