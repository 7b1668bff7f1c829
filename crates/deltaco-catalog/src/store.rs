//! # Catalog Store
//!
//! Append-only record keeping for mod and community-link metadata, backed
//! by one JSON document inside the landing zone.
//!
//! ## Consistency
//!
//! Every append is a full read-modify-write of the document. In
//! [`WriteMode::LastWriterWins`] nothing coordinates concurrent appends: two
//! interleaved cycles can both read the same document and the second write
//! silently discards the first one's entry. [`WriteMode::Serialized`] runs the
//! cycle under a process-local mutex shared by all clones of the store.
//!
//! The document itself is always replaced by rename, so a reader never
//! observes a partially written document and a failed write leaves the
//! previous one in place.
//!
//! There is no transaction spanning "file landed" and "catalog updated". If
//! the document write fails after an upload was placed, the file stays in
//! the landing zone and is listed as an orphan.

use std::fs;
use std::sync::Arc;

use deltaco_core::{
    AppendRequest, Catalog, CatalogListing, CommunityLinkDraft, ModDraft, UploadFilename,
};
use parking_lot::Mutex;

use crate::config::{CatalogConfig, WriteMode};
use crate::error::CatalogError;
use crate::landing_zone::{LandingZone, STAGING_PREFIX};

/// File-backed catalog store. Cheap to clone; clones share the write guard.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    zone: LandingZone,
    public_prefix: String,
    write_mode: WriteMode,
    write_guard: Arc<Mutex<()>>,
}

impl CatalogStore {
    /// Create a store handle. Does not touch the filesystem; call
    /// [`initialize`](Self::initialize) before serving.
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            zone: LandingZone::new(config.landing_zone),
            public_prefix: config.public_prefix,
            write_mode: config.write_mode,
            write_guard: Arc::new(Mutex::new(())),
        }
    }

    /// Create the landing zone and an empty catalog document if absent.
    ///
    /// Idempotent: an existing document is left untouched.
    pub fn initialize(&self) -> Result<(), CatalogError> {
        self.zone.ensure()?;
        let path = self.zone.catalog_path();
        if !path.exists() {
            self.write_catalog(&Catalog::new())?;
            tracing::info!(path = %path.display(), "created empty catalog document");
        }
        Ok(())
    }

    /// The landing zone this store manages.
    pub fn landing_zone(&self) -> &LandingZone {
        &self.zone
    }

    /// URL prefix under which landing-zone files are served.
    pub fn public_prefix(&self) -> &str {
        &self.public_prefix
    }

    /// The configured write mode.
    pub fn write_mode(&self) -> WriteMode {
        self.write_mode
    }

    /// Read the catalog document as stored, without merging.
    pub fn read_catalog(&self) -> Result<Catalog, CatalogError> {
        let path = self.zone.catalog_path();
        let raw = fs::read_to_string(&path)
            .map_err(|e| CatalogError::io("failed to read catalog document", &path, e))?;
        serde_json::from_str(&raw).map_err(|source| CatalogError::CorruptCatalog { path, source })
    }

    /// Merge landing-zone files with metadata records.
    ///
    /// Every file appears exactly once, in directory enumeration order.
    /// Records without a backing file are omitted.
    pub fn list(&self) -> Result<CatalogListing, CatalogError> {
        let catalog = self.read_catalog()?;
        let files = self.zone.files()?;
        let listing = CatalogListing::reconcile(&files, catalog, &self.public_prefix);
        tracing::debug!(
            files = files.len(),
            links = listing.community_links.len(),
            "listed catalog"
        );
        Ok(listing)
    }

    /// Append a validated record and persist the whole document.
    ///
    /// On failure nothing is written; the in-memory catalog is dropped.
    pub fn append(&self, request: AppendRequest) -> Result<(), CatalogError> {
        let kind = request.kind();
        match self.write_mode {
            WriteMode::LastWriterWins => self.read_modify_write(request)?,
            WriteMode::Serialized => {
                let _guard = self.write_guard.lock();
                self.read_modify_write(request)?
            }
        }
        tracing::info!(%kind, "catalog entry appended");
        Ok(())
    }

    /// Validate and append a community link.
    pub fn append_community_link(&self, draft: CommunityLinkDraft) -> Result<(), CatalogError> {
        let link = draft.into_link()?;
        self.append(AppendRequest::CommunityLink(link))
    }

    /// Place an uploaded file and append its metadata record.
    ///
    /// The file lands under a freshly generated name that keeps the
    /// extension of `original_name`. Returns that name.
    pub fn upload_mod(
        &self,
        draft: ModDraft,
        original_name: Option<&str>,
        bytes: &[u8],
    ) -> Result<UploadFilename, CatalogError> {
        let filename = UploadFilename::generate(original_name);
        let entry = draft.into_entry(&filename)?;
        self.zone.place(&filename, bytes)?;
        if let Err(err) = self.append(AppendRequest::Mod(entry)) {
            tracing::warn!(file = %filename, error = %err, "upload left without catalog record");
            return Err(err);
        }
        Ok(filename)
    }

    fn read_modify_write(&self, request: AppendRequest) -> Result<(), CatalogError> {
        let mut catalog = self.read_catalog()?;
        catalog.push(request);
        self.write_catalog(&catalog)
    }

    /// Replace the document atomically: write a sibling temp file, sync it,
    /// then rename it over the document. Readers see either the old or the
    /// new document, never a truncated one.
    fn write_catalog(&self, catalog: &Catalog) -> Result<(), CatalogError> {
        use std::io::Write;

        let path = self.zone.catalog_path();
        let persist_err = |source: std::io::Error| CatalogError::Persist {
            path: path.clone(),
            source,
        };
        let body = serde_json::to_vec_pretty(catalog)
            .map_err(|e| persist_err(std::io::Error::other(e)))?;

        let mut staged = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .tempfile_in(self.zone.root())
            .map_err(persist_err)?;
        staged.write_all(&body).map_err(persist_err)?;
        staged.as_file().sync_all().map_err(persist_err)?;
        staged.persist(&path).map_err(|e| persist_err(e.error))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use deltaco_core::{CommunityLink, ModEntry, CATALOG_FILE_NAME};

    use super::*;

    fn store_in(dir: &std::path::Path) -> CatalogStore {
        let store = CatalogStore::new(CatalogConfig::new(dir));
        store.initialize().unwrap();
        store
    }

    fn mod_draft(downloadable: Option<&str>) -> ModDraft {
        ModDraft {
            name: Some("Better Rifles".into()),
            description: Some("Rebalanced rifles".into()),
            version: Some("1.2".into()),
            category: Some("Gameplay".into()),
            downloadable: downloadable.map(str::to_string),
        }
    }

    #[test]
    fn initialize_writes_empty_document() {
        let tmp = tempfile::tempdir().unwrap();
        store_in(tmp.path());
        let raw = fs::read_to_string(tmp.path().join(CATALOG_FILE_NAME)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value, serde_json::json!({"mods": [], "communityLinks": []}));
    }

    #[test]
    fn initialize_keeps_existing_document() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store_in(tmp.path());
        store
            .append(AppendRequest::CommunityLink(CommunityLink {
                name: "Forum".into(),
                description: "d".into(),
                url: "http://x".into(),
            }))
            .unwrap();
        store.initialize().unwrap();
        assert_eq!(store.read_catalog().unwrap().community_links.len(), 1);
    }

    #[test]
    fn upload_mod_places_file_and_records_it() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store_in(tmp.path());
        let filename = store
            .upload_mod(mod_draft(Some("true")), Some("rifles.pbo"), b"PBO")
            .unwrap();

        assert!(filename.as_str().ends_with(".pbo"));
        assert_eq!(fs::read(store.landing_zone().path_for(&filename)).unwrap(), b"PBO");

        let listing = store.list().unwrap();
        let row = listing.find_by_file(filename.as_str()).unwrap();
        assert_eq!(row.name, "Better Rifles");
        assert!(row.downloadable);
        assert_eq!(row.url, format!("/mods/{filename}"));
    }

    #[test]
    fn upload_mod_with_missing_field_places_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store_in(tmp.path());
        let draft = ModDraft {
            category: None,
            ..mod_draft(None)
        };
        let err = store.upload_mod(draft, Some("x.zip"), b"x").unwrap_err();
        assert!(err.is_client_error());
        assert!(store.landing_zone().files().unwrap().is_empty());
    }

    #[test]
    fn corrupt_document_is_reported_not_repaired() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store_in(tmp.path());
        fs::write(store.landing_zone().catalog_path(), "{ not json").unwrap();

        assert!(matches!(store.list(), Err(CatalogError::CorruptCatalog { .. })));
        let link = AppendRequest::CommunityLink(CommunityLink {
            name: "a".into(),
            description: "b".into(),
            url: "c".into(),
        });
        assert!(matches!(
            store.append(link),
            Err(CatalogError::CorruptCatalog { .. })
        ));
        assert_eq!(
            fs::read_to_string(store.landing_zone().catalog_path()).unwrap(),
            "{ not json"
        );
    }

    #[test]
    fn duplicate_filenames_are_accepted() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store_in(tmp.path());
        let entry = ModEntry {
            name: "n".into(),
            description: "d".into(),
            version: "v".into(),
            category: "c".into(),
            filename: "same.pbo".into(),
            downloadable: false,
        };
        store.append(AppendRequest::Mod(entry.clone())).unwrap();
        store.append(AppendRequest::Mod(entry)).unwrap();
        assert_eq!(store.read_catalog().unwrap().mods.len(), 2);
    }

    #[test]
    fn writes_leave_no_staging_files() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store_in(tmp.path());
        for i in 0..5 {
            store
                .append(AppendRequest::CommunityLink(CommunityLink {
                    name: format!("link {i}"),
                    description: "d".into(),
                    url: "http://x".into(),
                }))
                .unwrap();
        }
        let names: Vec<_> = fs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec![CATALOG_FILE_NAME.to_string()]);
    }

    #[test]
    fn document_is_pretty_printed() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store_in(tmp.path());
        let raw = fs::read_to_string(store.landing_zone().catalog_path()).unwrap();
        assert!(raw.contains("\n  \"mods\""), "got: {raw}");
    }
}
