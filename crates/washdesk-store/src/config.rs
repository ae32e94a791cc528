//! # Store Configuration
//!
//! Where the data root lives.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variable (highest priority)                            │
//! │     WASHDESK_DATA_PATH=/srv/washdesk/data                              │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     $WASHDESK_CONFIG, else ./washdesk.toml                             │
//! │                                                                         │
//! │  3. Platform Data Directory (lowest priority)                          │
//! │     ~/.local/share/washdesk/data (Linux)                               │
//! │     ~/Library/Application Support/com.washdesk.washdesk/data (macOS)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # washdesk.toml
//! [storage]
//! data_path = "/srv/washdesk/data"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};

/// Environment variable naming the data root.
pub const DATA_PATH_ENV: &str = "WASHDESK_DATA_PATH";

/// Environment variable naming the TOML config file.
pub const CONFIG_PATH_ENV: &str = "WASHDESK_CONFIG";

/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "washdesk.toml";

// =============================================================================
// Config File
// =============================================================================

/// On-disk shape of `washdesk.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub storage: StorageSection,
}

/// `[storage]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageSection {
    pub data_path: Option<PathBuf>,
}

// =============================================================================
// StoreConfig
// =============================================================================

/// Resolved store settings.
///
/// ## Example
/// ```rust
/// use washdesk_store::StoreConfig;
///
/// let config = StoreConfig::new("./data");
/// assert!(config.data_path.ends_with("data"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Root directory every collection, ledger and singleton lives under.
    pub data_path: PathBuf,
}

impl StoreConfig {
    /// Builds a config for an explicit data root.
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        StoreConfig {
            data_path: data_path.into(),
        }
    }

    /// Resolves the data root from the environment, config file and
    /// platform defaults, in that order.
    pub fn load() -> StoreResult<Self> {
        let env_path = std::env::var(DATA_PATH_ENV).ok();
        let config_file = std::env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::from_sources(env_path, &config_file)
    }

    /// Resolution with the environment already read.
    pub fn from_sources(env_path: Option<String>, config_file: &Path) -> StoreResult<Self> {
        if let Some(path) = env_path.filter(|p| !p.trim().is_empty()) {
            debug!(path = %path, "Data path from environment");
            return Ok(Self::new(path));
        }

        if config_file.exists() {
            info!(path = %config_file.display(), "Loading store config from file");
            let contents = std::fs::read_to_string(config_file)
                .map_err(|e| StoreError::io(config_file, e))?;
            let parsed: ConfigFile = toml::from_str(&contents).map_err(|e| {
                StoreError::Config(format!("{}: {}", config_file.display(), e))
            })?;
            if let Some(path) = parsed.storage.data_path {
                return Ok(Self::new(path));
            }
            debug!("Config file has no storage.data_path");
        } else {
            debug!(path = %config_file.display(), "Config file not found");
        }

        Self::default_data_path()
            .map(Self::new)
            .ok_or_else(|| StoreError::Config("No home directory to place data in".into()))
    }

    /// Platform data directory, `…/washdesk/data`.
    fn default_data_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "washdesk", "washdesk")
            .map(|dirs| dirs.data_dir().join("data"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_env_path_wins() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("washdesk.toml");
        std::fs::write(&file, "[storage]\ndata_path = \"/from/file\"\n").unwrap();

        let config = StoreConfig::from_sources(Some("/from/env".into()), &file).unwrap();
        assert_eq!(config.data_path, PathBuf::from("/from/env"));
    }

    #[test]
    fn test_file_path_used_without_env() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("washdesk.toml");
        std::fs::write(&file, "[storage]\ndata_path = \"/from/file\"\n").unwrap();

        let config = StoreConfig::from_sources(None, &file).unwrap();
        assert_eq!(config.data_path, PathBuf::from("/from/file"));
    }

    #[test]
    fn test_blank_env_is_ignored() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("washdesk.toml");
        std::fs::write(&file, "[storage]\ndata_path = \"/from/file\"\n").unwrap();

        let config = StoreConfig::from_sources(Some("  ".into()), &file).unwrap();
        assert_eq!(config.data_path, PathBuf::from("/from/file"));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("washdesk.toml");
        std::fs::write(&file, "[storage\n").unwrap();

        let err = StoreConfig::from_sources(None, &file).unwrap_err();
        assert!(matches!(err, StoreError::Config(_)));
    }

    #[test]
    fn test_toml_serialization() {
        let file = ConfigFile {
            storage: StorageSection {
                data_path: Some(PathBuf::from("/srv/data")),
            },
        };
        let toml_str = toml::to_string_pretty(&file).unwrap();
        assert!(toml_str.contains("[storage]"));
    }
}
