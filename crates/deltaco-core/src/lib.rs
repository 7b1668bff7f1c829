#![deny(missing_docs)]

//! # deltaco-core -- Foundational Types for the Delta Co Gaming Service
//!
//! This crate defines the record types every other crate in the workspace
//! depends on. It performs no I/O and has no internal crate dependencies,
//! only `serde`, `serde_json`, `thiserror`, `uuid`, and `utoipa` from the
//! external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Typed records with validating constructors.** Submitted form fields
//!    arrive as [`ModDraft`] / [`CommunityLinkDraft`] and only become a
//!    [`ModEntry`] / [`CommunityLink`] after required-field checks. A missing
//!    field is a [`ValidationError`], never a silently empty value.
//!
//! 2. **One persisted shape.** [`Catalog`] serializes to exactly
//!    `{"mods": [...], "communityLinks": [...]}`, the on-disk format of the
//!    catalog document.
//!
//! 3. **Read-time reconciliation lives here.** [`ListedMod::merge`] encodes
//!    the asymmetric merge of landing-zone files with metadata records so the
//!    store and its tests share one definition.
//!
//! 4. **[`UploadFilename`] is the only path into the landing zone.** Names
//!    with path separators or parent references are rejected at construction.

pub mod catalog;
pub mod error;
pub mod filename;
pub mod listing;

pub use catalog::{
    parse_downloadable, AppendRequest, Catalog, CommunityLink, CommunityLinkDraft, EntryKind,
    ModDraft, ModEntry,
};
pub use error::ValidationError;
pub use filename::{UploadFilename, CATALOG_FILE_NAME};
pub use listing::{CatalogListing, ListedMod};
