//! # Request Extraction
//!
//! JSON body extraction with error mapping, and the multipart decoder for
//! catalog submissions.
//!
//! The decoder buffers the `file` part in memory; the body limit layer on
//! the catalog router bounds how much that can be.

use axum::body::Bytes;
use axum::extract::multipart::MultipartError;
use axum::extract::rejection::JsonRejection;
use axum::extract::Multipart;
use axum::http::StatusCode;
use axum::Json;
use deltaco_core::{CommunityLinkDraft, EntryKind, ModDraft};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::error::AppError;

/// Extract a JSON body, mapping deserialization errors to [`AppError::BadRequest`].
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// A file part received with a catalog submission.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Client-supplied filename, used only for its extension.
    pub original_name: Option<String>,
    pub bytes: Bytes,
}

/// A decoded `multipart/form-data` catalog submission.
///
/// Every text field is optional here; which ones are required depends on
/// `type` and is checked when the form becomes a draft. Unknown fields are
/// ignored. The binary part is named `file`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CatalogUploadForm {
    /// `mod` or `community-link`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    /// Community links only.
    pub url: Option<String>,
    /// Mods only.
    pub version: Option<String>,
    /// Mods only.
    pub category: Option<String>,
    /// Mods only. Exactly `"true"` marks the file downloadable.
    pub downloadable: Option<String>,
    #[serde(skip)]
    pub file: Option<UploadedFile>,
}

impl CatalogUploadForm {
    /// Drain a multipart stream into a form.
    ///
    /// A later occurrence of a text field replaces an earlier one. Only the
    /// first `file` part is kept.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = Self::default();
        while let Some(field) = multipart.next_field().await.map_err(decode_error)? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            if name == "file" {
                let original_name = field.file_name().map(str::to_string);
                let bytes = field.bytes().await.map_err(decode_error)?;
                if form.file.is_none() {
                    form.file = Some(UploadedFile {
                        original_name,
                        bytes,
                    });
                }
                continue;
            }
            let slot = match name.as_str() {
                "type" => &mut form.kind,
                "name" => &mut form.name,
                "description" => &mut form.description,
                "url" => &mut form.url,
                "version" => &mut form.version,
                "category" => &mut form.category,
                "downloadable" => &mut form.downloadable,
                _ => continue,
            };
            *slot = Some(field.text().await.map_err(decode_error)?);
        }
        Ok(form)
    }

    /// Parse the `type` discriminator. Absent is treated like an unknown type.
    pub fn entry_kind(&self) -> Result<EntryKind, AppError> {
        let raw = self.kind.as_deref().unwrap_or_default();
        Ok(raw.parse::<EntryKind>()?)
    }

    /// Fields relevant to a mod upload.
    pub fn mod_draft(&self) -> ModDraft {
        ModDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            version: self.version.clone(),
            category: self.category.clone(),
            downloadable: self.downloadable.clone(),
        }
    }

    /// Fields relevant to a community link.
    pub fn link_draft(&self) -> CommunityLinkDraft {
        CommunityLinkDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            url: self.url.clone(),
        }
    }
}

/// Oversized bodies are the client's problem; any other decode failure is
/// reported as an opaque server error.
fn decode_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::Internal(format!("failed to decode upload: {}", err.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> CatalogUploadForm {
        CatalogUploadForm {
            kind: Some("mod".into()),
            name: Some("Better Rifles".into()),
            description: Some("d".into()),
            url: Some("https://ignored".into()),
            version: Some("1.0".into()),
            category: Some("Gameplay".into()),
            downloadable: Some("true".into()),
            file: None,
        }
    }

    #[test]
    fn entry_kind_parses_discriminator() {
        assert_eq!(form().entry_kind().unwrap(), EntryKind::Mod);
        let link = CatalogUploadForm {
            kind: Some("community-link".into()),
            ..form()
        };
        assert_eq!(link.entry_kind().unwrap(), EntryKind::CommunityLink);
    }

    #[test]
    fn missing_or_unknown_kind_is_bad_request() {
        let missing = CatalogUploadForm {
            kind: None,
            ..form()
        };
        assert!(matches!(missing.entry_kind(), Err(AppError::BadRequest(_))));
        let unknown = CatalogUploadForm {
            kind: Some("plugin".into()),
            ..form()
        };
        assert!(matches!(unknown.entry_kind(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn drafts_take_only_their_fields() {
        let f = form();
        let m = f.mod_draft();
        assert_eq!(m.category.as_deref(), Some("Gameplay"));
        assert_eq!(m.downloadable.as_deref(), Some("true"));
        let l = f.link_draft();
        assert_eq!(l.url.as_deref(), Some("https://ignored"));
        assert_eq!(l.name.as_deref(), Some("Better Rifles"));
    }

    #[test]
    fn extract_json_unwraps_body() {
        let ok: Result<Json<u32>, JsonRejection> = Ok(Json(7));
        assert_eq!(extract_json(ok).unwrap(), 7);
    }
}
