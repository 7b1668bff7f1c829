//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps catalog and community-client errors to HTTP status codes and
//! returns JSON bodies with an error code and message. Internal details
//! (paths, parser positions, upstream bodies) are logged, never returned.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use deltaco_catalog::CatalogError;
use deltaco_community_client::CommunityApiError;
use deltaco_core::ValidationError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "VALIDATION_ERROR", "UPSTREAM_ERROR").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Structured context for validation errors, such as the missing field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Request validation failed (422).
    #[error("validation error: {message}")]
    Validation {
        message: String,
        details: Option<serde_json::Value>,
    },

    /// Request body could not be parsed (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Request body exceeds the configured limit (413).
    #[error("payload too large: {0}")]
    PayloadTooLarge(String),

    /// A required upstream is not configured (503).
    #[error("{0}")]
    ServiceUnavailable(String),

    /// An upstream call failed. Status is chosen by the route.
    #[error("{message}")]
    Upstream { status: StatusCode, message: String },

    /// Internal server error (500). Message is logged but not returned to client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Shorthand for [`AppError::Validation`] without details.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            details: None,
        }
    }

    /// Shorthand for [`AppError::ServiceUnavailable`].
    pub fn service_unavailable(msg: impl Into<String>) -> Self {
        Self::ServiceUnavailable(msg.into())
    }

    /// Shorthand for [`AppError::Upstream`].
    pub fn upstream(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
        }
    }

    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Validation { .. } => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::PayloadTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE"),
            Self::ServiceUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE"),
            Self::Upstream { status, .. } => (*status, "UPSTREAM_ERROR"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Never expose internal error messages to clients.
        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            other => other.to_string(),
        };

        if matches!(&self, Self::Internal(_)) {
            tracing::error!(error = %self, "internal server error");
        }

        let details = match self {
            Self::Validation { details, .. } => details,
            _ => None,
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// An unknown `type` discriminator is a malformed request; any other
/// validation failure is a well-formed request with bad content.
impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::UnknownKind(_) => Self::BadRequest(err.to_string()),
            ValidationError::MissingField { kind, field } => Self::Validation {
                message: err.to_string(),
                details: Some(serde_json::json!({ "kind": kind, "field": field })),
            },
            other => Self::validation(other.to_string()),
        }
    }
}

/// Validation failures are the client's; everything else is ours.
impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Validation(e) => e.into(),
            other => Self::Internal(other.to_string()),
        }
    }
}

/// Upstream failures default to 502 with a generic message; the detail is
/// logged here. Routes that need a different status or message map the
/// error themselves.
impl From<CommunityApiError> for AppError {
    fn from(err: CommunityApiError) -> Self {
        match err {
            CommunityApiError::NotConfigured(msg) => Self::service_unavailable(msg),
            other => {
                tracing::warn!(error = %other, "upstream request failed");
                Self::upstream(StatusCode::BAD_GATEWAY, "Upstream request failed")
            }
        }
    }
}
