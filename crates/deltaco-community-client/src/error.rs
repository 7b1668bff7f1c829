//! Community upstream client error types.

/// Errors from calls to Discord or BattleMetrics.
#[derive(Debug, thiserror::Error)]
pub enum CommunityApiError {
    /// The upstream this call needs has no configured URL.
    #[error("{0}")]
    NotConfigured(&'static str),
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// Upstream returned a non-2xx status.
    #[error("{endpoint} returned {status}: {body}")]
    ApiError {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// Response body could not be decoded.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },
    /// Response decoded but did not have the expected structure.
    #[error("invalid response from {endpoint}: {reason}")]
    InvalidResponse { endpoint: String, reason: String },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

impl CommunityApiError {
    /// Upstream HTTP status, when the upstream answered with a failure.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::ApiError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Map a non-success response to [`CommunityApiError::ApiError`], otherwise pass it through.
pub(crate) async fn check_status(
    endpoint: &str,
    resp: reqwest::Response,
) -> Result<reqwest::Response, CommunityApiError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status().as_u16();
    let body = resp
        .text()
        .await
        .unwrap_or_else(|e| format!("<failed to read response body: {e}>"));
    Err(CommunityApiError::ApiError {
        endpoint: endpoint.to_string(),
        status,
        body,
    })
}
