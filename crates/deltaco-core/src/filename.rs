//! # Upload Filenames
//!
//! Names of files inside the landing zone. Generated names are a random
//! UUID (simple form) plus the uploaded file's original extension, so two
//! uploads of `mod.pbo` land as distinct files that still end in `.pbo`.
//!
//! ## Security Invariant
//!
//! An [`UploadFilename`] never contains a path separator, a parent reference,
//! or the catalog document's own name. Joining one onto the landing-zone root
//! always yields a direct child of that root.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Fixed name of the catalog document inside the landing zone.
pub const CATALOG_FILE_NAME: &str = "community_links.json";

/// Longest extension carried over from an uploaded file's original name.
const MAX_EXTENSION_LEN: usize = 16;

/// A validated filename that is safe to join onto the landing-zone root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UploadFilename(String);

impl UploadFilename {
    /// Validate an existing filename.
    pub fn parse(name: &str) -> Result<Self, ValidationError> {
        let invalid = name.is_empty()
            || name == "."
            || name.contains("..")
            || name.contains('/')
            || name.contains('\\')
            || name.contains('\0')
            || name == CATALOG_FILE_NAME;
        if invalid {
            return Err(ValidationError::InvalidFilename(name.to_string()));
        }
        Ok(Self(name.to_string()))
    }

    /// Generate a fresh collision-avoiding name, keeping the extension of
    /// `original` when it has a plain alphanumeric one.
    pub fn generate(original: Option<&str>) -> Self {
        let stem = Uuid::new_v4().simple().to_string();
        match original.and_then(extension_of) {
            Some(ext) => Self(format!("{stem}.{ext}")),
            None => Self(stem),
        }
    }

    /// The filename as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn extension_of(original: &str) -> Option<String> {
    // Browsers may send a full client path; only the final component matters.
    let base = original.rsplit(['/', '\\']).next().unwrap_or(original);
    let ext = Path::new(base).extension()?.to_str()?;
    let plain = !ext.is_empty()
        && ext.len() <= MAX_EXTENSION_LEN
        && ext.chars().all(|c| c.is_ascii_alphanumeric());
    plain.then(|| ext.to_string())
}

impl fmt::Display for UploadFilename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for UploadFilename {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UploadFilename {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<UploadFilename> for String {
    fn from(value: UploadFilename) -> Self {
        value.0
    }
}
