//! # deltaco-catalog -- File-Backed Mod Catalog
//!
//! The only stateful component of the community service. Uploaded mod files
//! land in one directory (the landing zone); their metadata, together with
//! community links, lives in a JSON document beside them
//! (`community_links.json`).
//!
//! ## Operations
//!
//! | Operation | Effect |
//! |-----------|--------|
//! | [`CatalogStore::initialize`] | Create landing zone and empty document if absent. Idempotent. |
//! | [`CatalogStore::list`] | Merge landing-zone files with metadata records. |
//! | [`CatalogStore::append`] | Full read-modify-write of the document with one new record. |
//! | [`CatalogStore::upload_mod`] | Place a file under a generated name, then append its record. |
//!
//! ## Read-Time Reconciliation
//!
//! Files and records are two separate sources of truth, joined by filename
//! on every listing. Orphan files are listed with default metadata; records
//! whose file is gone are not listed. Nothing is cleaned up on write.

pub mod config;
pub mod error;
pub mod landing_zone;
pub mod store;

pub use config::{CatalogConfig, ConfigError, WriteMode};
pub use error::CatalogError;
pub use landing_zone::LandingZone;
pub use store::CatalogStore;
