/// Gallery configuration
///
/// Stored as JSON in the user's config directory:
/// - Linux: ~/.config/media-timeline/gallery.json
/// - macOS: ~/Library/Application Support/media-timeline/gallery.json
/// - Windows: %APPDATA%\media-timeline\gallery.json

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Error, Result};

/// Items per grid row when nothing else is configured
pub const DEFAULT_ROW_SIZE: usize = 3;

/// chrono pattern for "DD Month YYYY" date keys
pub const DEFAULT_DATE_FORMAT: &str = "%d %B %Y";

/// Settings that shape the derived timeline
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct GalleryConfig {
    /// Number of items per grid row (must be >= 1)
    ///
    /// Shared by the row chunker and the navigation cursor, so
    /// (row, column) taps always map to the same flattened index.
    pub row_size: usize,

    /// chrono format used to parse section date keys
    pub date_format: String,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            row_size: DEFAULT_ROW_SIZE,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl GalleryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert to JSON string for storage
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON string; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the timeline cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.row_size == 0 {
            return Err(Error::InvalidRowSize(self.row_size));
        }
        Ok(())
    }

    /// Load a config file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        debug!(path = %path.display(), row_size = config.row_size, "loaded gallery config");
        Ok(config)
    }

    /// Load the config from the default location, or defaults if there is none
    pub fn load_or_default() -> Result<Self> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load(&path)
        } else {
            debug!(path = %path.display(), "no gallery config found, using defaults");
            Ok(Self::default())
        }
    }

    /// Get the path where the config file should live
    pub fn default_path() -> Result<PathBuf> {
        let mut path = dirs::config_dir()
            .or_else(dirs::home_dir)
            .ok_or(Error::ConfigDirUnavailable)?;

        path.push("media-timeline");
        path.push("gallery.json");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = GalleryConfig::default();
        assert_eq!(config.row_size, 3);
        assert_eq!(config.date_format, "%d %B %Y");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_serialization() {
        let mut config = GalleryConfig::default();
        config.row_size = 4;

        let json = config.to_json().unwrap();
        let restored = GalleryConfig::from_json(&json).unwrap();

        assert_eq!(config, restored);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = GalleryConfig::from_json(r#"{"row_size": 5}"#).unwrap();
        assert_eq!(config.row_size, 5);
        assert_eq!(config.date_format, DEFAULT_DATE_FORMAT);
    }

    #[test]
    fn test_zero_row_size_is_rejected() {
        let err = GalleryConfig::from_json(r#"{"row_size": 0}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidRowSize(0)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"row_size": 2}}"#).unwrap();

        let config = GalleryConfig::load(file.path()).unwrap();
        assert_eq!(config.row_size, 2);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = GalleryConfig::load(Path::new("/nonexistent/gallery.json")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
