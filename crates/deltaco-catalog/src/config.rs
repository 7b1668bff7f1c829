//! Catalog store configuration.
//!
//! Locates the landing zone and chooses the write discipline. Defaults match
//! a deployment that serves `public/mods` under `/mods`. Override via
//! environment variables or explicit construction for tests.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// How concurrent appends to the catalog document are coordinated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// No coordination. Concurrent appends race their read-modify-write
    /// cycles; the last writer wins and the other update is lost silently.
    #[default]
    LastWriterWins,
    /// Appends made through one store (and its clones) run one at a time.
    /// Does not coordinate with other processes.
    Serialized,
}

impl fmt::Display for WriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LastWriterWins => "last-writer-wins",
            Self::Serialized => "serialized",
        })
    }
}

impl FromStr for WriteMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "last-writer-wins" | "" => Ok(Self::LastWriterWins),
            "serialized" => Ok(Self::Serialized),
            other => Err(ConfigError::InvalidWriteMode(other.to_string())),
        }
    }
}

/// Configuration for a [`CatalogStore`](crate::CatalogStore).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Directory holding uploaded files and the catalog document.
    pub landing_zone: PathBuf,
    /// URL prefix under which landing-zone files are served.
    pub public_prefix: String,
    /// Append coordination.
    pub write_mode: WriteMode,
}

impl CatalogConfig {
    /// Configuration rooted at `landing_zone` with default prefix and mode.
    pub fn new(landing_zone: impl Into<PathBuf>) -> Self {
        Self {
            landing_zone: landing_zone.into(),
            public_prefix: "/mods".to_string(),
            write_mode: WriteMode::default(),
        }
    }

    /// Set the write mode.
    pub fn with_write_mode(mut self, mode: WriteMode) -> Self {
        self.write_mode = mode;
        self
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `LANDING_ZONE_DIR` (default: `public/mods`)
    /// - `MODS_PUBLIC_PREFIX` (default: `/mods`)
    /// - `CATALOG_WRITE_MODE` (default: `last-writer-wins`; also `serialized`)
    pub fn from_env() -> Result<Self, ConfigError> {
        let landing_zone = std::env::var("LANDING_ZONE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("public").join("mods"));

        let public_prefix = std::env::var("MODS_PUBLIC_PREFIX").unwrap_or_else(|_| "/mods".into());
        if !public_prefix.starts_with('/') {
            return Err(ConfigError::InvalidPrefix(public_prefix));
        }

        let write_mode = match std::env::var("CATALOG_WRITE_MODE") {
            Ok(raw) => raw.parse()?,
            Err(_) => WriteMode::default(),
        };

        Ok(Self {
            landing_zone,
            public_prefix: public_prefix.trim_end_matches('/').to_string(),
            write_mode,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid CATALOG_WRITE_MODE \"{0}\" (expected last-writer-wins or serialized)")]
    InvalidWriteMode(String),
    #[error("MODS_PUBLIC_PREFIX must start with '/': \"{0}\"")]
    InvalidPrefix(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_mode_parses_known_values() {
        assert_eq!("serialized".parse::<WriteMode>().unwrap(), WriteMode::Serialized);
        assert_eq!(" Serialized ".parse::<WriteMode>().unwrap(), WriteMode::Serialized);
        assert_eq!(
            "last-writer-wins".parse::<WriteMode>().unwrap(),
            WriteMode::LastWriterWins
        );
        assert!("locked".parse::<WriteMode>().is_err());
    }

    #[test]
    fn default_mode_is_last_writer_wins() {
        assert_eq!(CatalogConfig::new("/srv/mods").write_mode, WriteMode::LastWriterWins);
    }

    #[test]
    fn display_matches_parse() {
        for mode in [WriteMode::LastWriterWins, WriteMode::Serialized] {
            assert_eq!(mode.to_string().parse::<WriteMode>().unwrap(), mode);
        }
    }
}
