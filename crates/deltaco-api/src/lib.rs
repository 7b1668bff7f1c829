//! # deltaco-api -- Axum Service for the Delta Co Gaming Community Site
//!
//! Serves the mod catalog and the community widgets' backend.
//!
//! ## API Surface
//!
//! | Route                 | Module                | Backing                 |
//! |-----------------------|-----------------------|-------------------------|
//! | `GET/POST /catalog`   | [`routes::catalog`]   | `deltaco-catalog` store |
//! | `GET {prefix}/*`      | static files          | landing zone directory  |
//! | `POST /support`       | [`routes::support`]   | Discord webhook         |
//! | `GET /servers`        | [`routes::servers`]   | BattleMetrics           |
//! | `GET /members`        | [`routes::members`]   | Discord widget          |
//! | `GET /metrics`        | [`middleware::metrics`] | Prometheus recorder   |
//! | `GET /openapi.json`   | [`openapi`]           | utoipa                  |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → MetricsMiddleware → Handler
//! ```
//!
//! Health probes (`/health/*`) sit outside both layers.

pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

pub use error::AppError;
pub use state::{AppConfig, AppState};

use axum::middleware::from_fn;
use axum::routing::get;
use axum::Router;
use tower_http::services::ServeDir;

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let files = ServeDir::new(state.catalog.landing_zone().root());
    let prefix = state.catalog.public_prefix().trim_end_matches('/').to_string();

    let mut api = Router::new()
        .merge(routes::catalog::router(state.config.upload_max_bytes))
        .merge(routes::support::router())
        .merge(routes::servers::router())
        .merge(routes::members::router())
        .merge(openapi::router())
        .route("/metrics", get(middleware::metrics::render));
    // Files served from the root act as the fallback for unmatched paths.
    api = if prefix.is_empty() {
        api.fallback_service(files)
    } else {
        api.nest_service(&prefix, files)
    };

    let api = api
        .layer(from_fn(middleware::metrics::metrics_middleware))
        .layer(middleware::tracing_layer::layer())
        .with_state(state);

    let health = Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness));

    Router::new().merge(health).merge(api)
}

/// Liveness probe: 200 while the process runs.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe: 200 once the router is built, which happens only after
/// the catalog store has been initialized.
async fn readiness() -> &'static str {
    "ready"
}
