//! # Prometheus Metrics
//!
//! Request counters and latency histograms recorded through the `metrics`
//! facade. When no recorder is installed (tests, or a binary that skipped
//! installation) the macros are no-ops.
//!
//! | Metric | Kind | Labels |
//! |--------|------|--------|
//! | `deltaco_http_requests_total` | counter | `method`, `path`, `status` |
//! | `deltaco_http_request_duration_seconds` | histogram | `method`, `path` |

use std::time::Instant;

use axum::extract::{MatchedPath, Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::state::AppState;

pub const REQUESTS_TOTAL: &str = "deltaco_http_requests_total";
pub const REQUEST_DURATION: &str = "deltaco_http_request_duration_seconds";

/// Install the global Prometheus recorder and return its render handle.
///
/// Fails if another recorder is already installed in this process.
pub fn install_recorder() -> Result<PrometheusHandle, metrics_exporter_prometheus::BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Middleware that records one counter increment and one latency sample
/// per request.
///
/// Paths are labelled by their route template so that generated upload
/// names do not explode label cardinality; unmatched requests share the
/// label `unmatched`.
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());
    let start = Instant::now();

    let response = next.run(request).await;

    let status = response.status().as_u16().to_string();
    metrics::counter!(REQUESTS_TOTAL, "method" => method.clone(), "path" => path.clone(), "status" => status)
        .increment(1);
    metrics::histogram!(REQUEST_DURATION, "method" => method, "path" => path)
        .record(start.elapsed().as_secs_f64());

    response
}

/// GET /metrics: Prometheus text exposition.
///
/// Answers 404 when the process runs without a recorder.
pub async fn render(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => (
            [(axum::http::header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
