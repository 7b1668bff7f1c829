//! # Landing Zone
//!
//! The directory uploaded files are written into and served from. The
//! catalog document lives in the same directory and is excluded from
//! enumeration.

use std::fs;
use std::path::{Path, PathBuf};

use deltaco_core::{UploadFilename, CATALOG_FILE_NAME};

use crate::error::CatalogError;

/// Name prefix of the temp file a catalog document write is staged in.
/// Such files are never enumerated.
pub const STAGING_PREFIX: &str = ".community_links.staging";

/// Handle on the landing-zone directory.
#[derive(Debug, Clone)]
pub struct LandingZone {
    root: PathBuf,
}

impl LandingZone {
    /// Wrap `root` without touching the filesystem.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The landing-zone directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the catalog document.
    pub fn catalog_path(&self) -> PathBuf {
        self.root.join(CATALOG_FILE_NAME)
    }

    /// Path of an uploaded file.
    pub fn path_for(&self, filename: &UploadFilename) -> PathBuf {
        self.root.join(filename.as_str())
    }

    /// Create the directory (and parents) if absent.
    pub fn ensure(&self) -> Result<(), CatalogError> {
        fs::create_dir_all(&self.root)
            .map_err(|e| CatalogError::io("failed to create landing zone", &self.root, e))
    }

    /// Write `bytes` under `filename`.
    ///
    /// Fails rather than overwrite if `filename` already exists.
    pub fn place(&self, filename: &UploadFilename, bytes: &[u8]) -> Result<(), CatalogError> {
        use std::io::Write;

        let path = self.path_for(filename);
        let upload_err = |source: std::io::Error| CatalogError::Upload {
            filename: filename.to_string(),
            source,
        };
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(upload_err)?;
        file.write_all(bytes).map_err(upload_err)?;
        file.sync_all().map_err(upload_err)?;

        tracing::debug!(file = %filename, bytes = bytes.len(), "upload placed in landing zone");
        Ok(())
    }

    /// Every regular file in the landing zone except the catalog document
    /// and its staging files, in directory enumeration order.
    ///
    /// Entries whose names are not valid UTF-8 are skipped.
    pub fn files(&self) -> Result<Vec<String>, CatalogError> {
        let entries = fs::read_dir(&self.root)
            .map_err(|e| CatalogError::io("failed to enumerate landing zone", &self.root, e))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry
                .map_err(|e| CatalogError::io("failed to enumerate landing zone", &self.root, e))?;
            let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
            if !is_file {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) if name == CATALOG_FILE_NAME || name.starts_with(STAGING_PREFIX) => {}
                Ok(name) => names.push(name),
                Err(raw) => {
                    tracing::warn!(name = ?raw, "skipping landing-zone file with non-UTF-8 name");
                }
            }
        }
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_creates_nested_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let zone = LandingZone::new(tmp.path().join("public").join("mods"));
        zone.ensure().unwrap();
        zone.ensure().unwrap();
        assert!(zone.root().is_dir());
    }

    #[test]
    fn files_excludes_catalog_staging_and_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let zone = LandingZone::new(tmp.path());
        fs::write(zone.catalog_path(), "{}").unwrap();
        fs::write(tmp.path().join("a.pbo"), b"x").unwrap();
        fs::write(tmp.path().join(format!("{STAGING_PREFIX}X1y2Z3")), b"{").unwrap();
        fs::create_dir(tmp.path().join("nested")).unwrap();

        let files = zone.files().unwrap();
        assert_eq!(files, vec!["a.pbo".to_string()]);
    }

    #[test]
    fn place_refuses_to_overwrite() {
        let tmp = tempfile::tempdir().unwrap();
        let zone = LandingZone::new(tmp.path());
        let name = UploadFilename::parse("same.zip").unwrap();
        zone.place(&name, b"first").unwrap();
        let err = zone.place(&name, b"second").unwrap_err();
        assert!(matches!(err, CatalogError::Upload { .. }));
        assert_eq!(fs::read(zone.path_for(&name)).unwrap(), b"first");
    }

    #[test]
    fn place_into_missing_directory_is_upload_error() {
        let tmp = tempfile::tempdir().unwrap();
        let zone = LandingZone::new(tmp.path().join("absent"));
        let name = UploadFilename::parse("x.zip").unwrap();
        assert!(matches!(
            zone.place(&name, b"x"),
            Err(CatalogError::Upload { .. })
        ));
    }

    #[test]
    fn files_on_missing_directory_is_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let zone = LandingZone::new(tmp.path().join("absent"));
        assert!(matches!(zone.files(), Err(CatalogError::Io { .. })));
    }
}
