//! # Catalog Errors
//!
//! Failure taxonomy of the catalog store. None of these are retried and none
//! are fatal to the process; callers report them as an opaque failure.

use std::path::PathBuf;

use deltaco_core::ValidationError;
use thiserror::Error;

/// Errors raised by [`CatalogStore`](crate::CatalogStore) operations.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The catalog document is not valid JSON of the expected shape.
    #[error("catalog document {path} is corrupt: {source}")]
    CorruptCatalog {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The uploaded file could not be placed into the landing zone.
    #[error("failed to store upload {filename}: {source}")]
    Upload {
        filename: String,
        #[source]
        source: std::io::Error,
    },

    /// The catalog document could not be written back.
    #[error("failed to persist catalog document {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Any other filesystem failure (creating or enumerating the landing zone,
    /// reading the catalog document).
    #[error("{context} {path}: {source}")]
    Io {
        context: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Submitted fields did not form a valid record.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl CatalogError {
    pub(crate) fn io(context: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            context,
            path: path.into(),
            source,
        }
    }

    /// Whether the failure was caused by the caller's input rather than storage.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
