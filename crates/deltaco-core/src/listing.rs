//! # Merged Listing
//!
//! The read view of the catalog. Landing-zone files and metadata records are
//! reconciled by exact filename:
//!
//! - a file with a matching record is listed with the record's fields laid
//!   over the synthesized ones (a non-empty display name replaces the
//!   filename);
//! - a file without a record (an orphan) is listed as
//!   `{name: <filename>, url, downloadable: false}`;
//! - a record without a file (dangling metadata) is not listed.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::catalog::{Catalog, CommunityLink, ModEntry};

/// One row of the merged mod listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ListedMod {
    /// Display name from the record, or the filename for orphans.
    pub name: String,
    /// Public URL of the file.
    pub url: String,
    /// Download flag from the record; `false` for orphans.
    pub downloadable: bool,
    /// Present only when a record matched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Present only when a record matched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Present only when a record matched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Present only when a record matched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

impl ListedMod {
    /// Project one landing-zone file, overlaying its record when present.
    pub fn merge(filename: &str, public_prefix: &str, record: Option<&ModEntry>) -> Self {
        let url = format!("{}/{}", public_prefix.trim_end_matches('/'), filename);
        match record {
            Some(entry) => Self {
                name: if entry.name.is_empty() {
                    filename.to_string()
                } else {
                    entry.name.clone()
                },
                url,
                downloadable: entry.downloadable,
                description: Some(entry.description.clone()),
                version: Some(entry.version.clone()),
                category: Some(entry.category.clone()),
                filename: Some(entry.filename.clone()),
            },
            None => Self {
                name: filename.to_string(),
                url,
                downloadable: false,
                description: None,
                version: None,
                category: None,
                filename: None,
            },
        }
    }
}

/// The full merged view returned by a catalog listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogListing {
    /// One row per landing-zone file.
    pub mods: Vec<ListedMod>,
    /// Community links, unchanged from the catalog.
    pub community_links: Vec<CommunityLink>,
}

impl CatalogListing {
    /// Merge `files` (landing-zone filenames, in enumeration order) with `catalog`.
    pub fn reconcile<I, S>(files: I, catalog: Catalog, public_prefix: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mods = files
            .into_iter()
            .map(|f| {
                let f = f.as_ref();
                ListedMod::merge(f, public_prefix, catalog.find_mod(f))
            })
            .collect();
        Self {
            mods,
            community_links: catalog.community_links,
        }
    }

    /// The listed row for `filename`, matched by URL suffix.
    pub fn find_by_file(&self, filename: &str) -> Option<&ListedMod> {
        let suffix = format!("/{filename}");
        self.mods.iter().find(|m| m.url.ends_with(&suffix))
    }
}
