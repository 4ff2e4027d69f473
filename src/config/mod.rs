//! Application configuration
//!
//! Loaded from a JSON file. Every key is optional:
//!
//! ```json
//! {
//!     "cache_capacity": 10,
//!     "database_path": "players.db",
//!     "database_init": true,
//!     "database_remove_data": false,
//!     "logical_delete": true
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::service::DeleteMode;

/// Database path meaning "private in-memory database"
pub const IN_MEMORY_DATABASE: &str = ":memory:";

/// Result type for configuration
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Bounded cache capacity; values at or below zero keep one entry at most
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: i64,

    /// SQLite database file, or `:memory:`
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Create the player table on startup if missing
    #[serde(default = "default_true")]
    pub database_init: bool,

    /// Delete every player on startup
    #[serde(default)]
    pub database_remove_data: bool,

    /// Soft delete instead of removing rows
    #[serde(default = "default_true")]
    pub logical_delete: bool,
}

fn default_cache_capacity() -> i64 {
    10
}
fn default_database_path() -> String {
    "players.db".to_string()
}
fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cache_capacity: default_cache_capacity(),
            database_path: default_database_path(),
            database_init: true,
            database_remove_data: false,
            logical_delete: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from a file. A missing file yields the defaults.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            info!(path = %path.display(), "config file not found; using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Parse and validate configuration JSON
    pub fn from_json(content: &str) -> ConfigResult<Self> {
        let config: AppConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.database_path.trim().is_empty() {
            return Err(ConfigError::Invalid("database_path must not be empty".into()));
        }
        Ok(())
    }

    /// True if the database lives in memory only
    pub fn is_in_memory(&self) -> bool {
        self.database_path == IN_MEMORY_DATABASE
    }

    /// Delete mode implied by `logical_delete`
    pub fn delete_mode(&self) -> DeleteMode {
        if self.logical_delete {
            DeleteMode::Logical
        } else {
            DeleteMode::Physical
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_object_uses_defaults() {
        assert_eq!(AppConfig::from_json("{}").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_json(
            r#"{"cache_capacity": -3, "database_path": ":memory:", "logical_delete": false}"#,
        )
        .unwrap();
        assert_eq!(config.cache_capacity, -3);
        assert!(config.is_in_memory());
        assert_eq!(config.delete_mode(), DeleteMode::Physical);
        assert!(config.database_init);
    }

    #[test]
    fn test_empty_database_path_rejected() {
        let err = AppConfig::from_json(r#"{"database_path": " "}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(matches!(
            AppConfig::from_json("{cache_capacity"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = AppConfig::load(&temp_dir.path().join("missing.json")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("rosterdb.json");
        fs::write(&path, r#"{"cache_capacity": 2}"#).unwrap();
        assert_eq!(AppConfig::load(&path).unwrap().cache_capacity, 2);
    }
}
