//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor.
//!
//! - **Catalog store**: the landing zone and its metadata document
//! - **Community client**: Discord widget, support webhook, BattleMetrics
//! - **Metrics handle**: renders the Prometheus exposition, when installed

use deltaco_catalog::CatalogStore;
use deltaco_community_client::CommunityClient;
use metrics_exporter_prometheus::PrometheusHandle;

/// Default upper bound on a catalog submission body (256 MiB).
pub const DEFAULT_UPLOAD_MAX_BYTES: usize = 256 * 1024 * 1024;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Largest accepted catalog submission body, in bytes.
    pub upload_max_bytes: usize,
}

impl AppConfig {
    /// Read `PORT` and `UPLOAD_MAX_BYTES`, falling back to defaults for
    /// absent or unparsable values.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);
        let upload_max_bytes = std::env::var("UPLOAD_MAX_BYTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.upload_max_bytes);
        Self {
            port,
            upload_max_bytes,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            upload_max_bytes: DEFAULT_UPLOAD_MAX_BYTES,
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogStore,
    pub community: CommunityClient,
    pub metrics: Option<PrometheusHandle>,
    pub config: AppConfig,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("catalog", &self.catalog)
            .field("community", &self.community)
            .field("metrics", &self.metrics.as_ref().map(|_| "prometheus"))
            .field("config", &self.config)
            .finish()
    }
}

impl AppState {
    /// Create application state without a metrics recorder.
    pub fn new(config: AppConfig, catalog: CatalogStore, community: CommunityClient) -> Self {
        Self {
            catalog,
            community,
            metrics: None,
            config,
        }
    }

    /// Attach the handle of an installed Prometheus recorder.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = AppConfig::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.upload_max_bytes, 268_435_456);
    }
}
