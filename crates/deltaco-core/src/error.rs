//! # Error Hierarchy
//!
//! Validation errors raised when turning submitted form fields into typed
//! catalog records. Built with `thiserror`; each variant carries the
//! offending input so operators can diagnose a rejected upload from the log.

use thiserror::Error;

/// Validation errors for catalog records and upload filenames.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field was absent or blank.
    #[error("missing required field \"{field}\" for {kind}")]
    MissingField {
        /// The entry kind being built ("mod" or "community-link").
        kind: &'static str,
        /// The name of the missing field.
        field: &'static str,
    },

    /// The `type` discriminator named no known entry kind.
    #[error("unknown entry type: \"{0}\" (expected \"mod\" or \"community-link\")")]
    UnknownKind(String),

    /// A filename would escape the landing zone or shadow the catalog document.
    #[error("invalid upload filename: \"{0}\"")]
    InvalidFilename(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_message_names_field_and_kind() {
        let err = ValidationError::MissingField {
            kind: "mod",
            field: "version",
        };
        let msg = err.to_string();
        assert!(msg.contains("version"), "got: {msg}");
        assert!(msg.contains("mod"), "got: {msg}");
    }

    #[test]
    fn unknown_kind_message_lists_accepted_values() {
        let msg = ValidationError::UnknownKind("plugin".into()).to_string();
        assert!(msg.contains("plugin"));
        assert!(msg.contains("community-link"));
    }
}
