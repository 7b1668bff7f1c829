//! # Catalog Records
//!
//! The persisted aggregate ([`Catalog`]) and its two record types, plus the
//! draft types that carry raw submitted fields until validation.
//!
//! ## Wire Format
//!
//! ```json
//! {
//!   "mods": [
//!     { "name": "...", "description": "...", "version": "...",
//!       "category": "...", "filename": "...", "downloadable": true }
//!   ],
//!   "communityLinks": [
//!     { "name": "...", "description": "...", "url": "..." }
//!   ]
//! }
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ValidationError;
use crate::filename::UploadFilename;

/// Metadata for one uploaded mod file.
///
/// Fields default to empty when absent from a stored document so that a
/// hand-edited catalog with a partial record still parses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ModEntry {
    /// Display name, user-supplied.
    #[serde(default)]
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Free-form version label.
    #[serde(default)]
    pub version: String,
    /// Open-ended category label (e.g. "Gameplay", "Graphics").
    #[serde(default)]
    pub category: String,
    /// On-disk name in the landing zone, assigned at upload time.
    #[serde(default)]
    pub filename: String,
    /// Whether the listing should offer a download.
    #[serde(default)]
    pub downloadable: bool,
}

/// An externally hosted community resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CommunityLink {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Target URL. Not format-checked.
    #[serde(default)]
    pub url: String,
}

/// The catalog document: every mod record and community link, in append order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    /// Mod metadata records. Duplicated filenames are possible.
    pub mods: Vec<ModEntry>,
    /// Community links.
    pub community_links: Vec<CommunityLink>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// First mod record whose `filename` equals `filename` exactly.
    pub fn find_mod(&self, filename: &str) -> Option<&ModEntry> {
        self.mods.iter().find(|m| m.filename == filename)
    }

    /// Append a validated request to the matching sequence.
    pub fn push(&mut self, request: AppendRequest) {
        match request {
            AppendRequest::Mod(entry) => self.mods.push(entry),
            AppendRequest::CommunityLink(link) => self.community_links.push(link),
        }
    }
}

/// The two kinds of entry the catalog accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// An uploaded mod file with metadata.
    Mod,
    /// An external link.
    CommunityLink,
}

impl EntryKind {
    /// The form value naming this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mod => "mod",
            Self::CommunityLink => "community-link",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mod" => Ok(Self::Mod),
            "community-link" => Ok(Self::CommunityLink),
            other => Err(ValidationError::UnknownKind(other.to_string())),
        }
    }
}

/// Coerce the submitted `downloadable` flag.
///
/// Only the exact string `"true"` is truthy. `"TRUE"`, `"yes"`, `"1"` and an
/// absent flag all yield `false`.
pub fn parse_downloadable(flag: Option<&str>) -> bool {
    flag == Some("true")
}

fn require(
    kind: EntryKind,
    field: &'static str,
    value: Option<String>,
) -> Result<String, ValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ValidationError::MissingField {
            kind: kind.as_str(),
            field,
        }),
    }
}

/// Raw fields submitted for a mod upload, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModDraft {
    /// Display name.
    pub name: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Version label.
    pub version: Option<String>,
    /// Category label.
    pub category: Option<String>,
    /// Raw downloadable flag as submitted.
    pub downloadable: Option<String>,
}

impl ModDraft {
    /// Validate required fields and bind the draft to the landed file.
    pub fn into_entry(self, filename: &UploadFilename) -> Result<ModEntry, ValidationError> {
        let kind = EntryKind::Mod;
        Ok(ModEntry {
            name: require(kind, "name", self.name)?,
            description: require(kind, "description", self.description)?,
            version: require(kind, "version", self.version)?,
            category: require(kind, "category", self.category)?,
            filename: filename.as_str().to_string(),
            downloadable: parse_downloadable(self.downloadable.as_deref()),
        })
    }
}

/// Raw fields submitted for a community link, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommunityLinkDraft {
    /// Display name.
    pub name: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Target URL.
    pub url: Option<String>,
}

impl CommunityLinkDraft {
    /// Validate presence of `name`, `description` and `url`.
    pub fn into_link(self) -> Result<CommunityLink, ValidationError> {
        let kind = EntryKind::CommunityLink;
        Ok(CommunityLink {
            name: require(kind, "name", self.name)?,
            description: require(kind, "description", self.description)?,
            url: require(kind, "url", self.url)?,
        })
    }
}

/// A validated record ready to be appended to the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppendRequest {
    /// Append to `mods`.
    Mod(ModEntry),
    /// Append to `communityLinks`.
    CommunityLink(CommunityLink),
}

impl AppendRequest {
    /// The kind of record carried.
    pub fn kind(&self) -> EntryKind {
        match self {
            Self::Mod(_) => EntryKind::Mod,
            Self::CommunityLink(_) => EntryKind::CommunityLink,
        }
    }
}
