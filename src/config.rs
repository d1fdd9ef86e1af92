//! Save-location configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Which backing store holds saved games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// One JSON file per save in a directory.
    #[default]
    Files,
    /// A SQLite database table.
    Sqlite,
}

/// Where saved games live.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct SaveConfig {
    /// Backing store kind.
    #[serde(default)]
    backend: StoreBackend,

    /// Directory for the file backend.
    #[serde(default = "default_save_dir")]
    save_dir: PathBuf,

    /// Database path for the SQLite backend.
    #[serde(default = "default_db_path")]
    db_path: String,
}

#[instrument]
fn default_save_dir() -> PathBuf {
    PathBuf::from("saves")
}

#[instrument]
fn default_db_path() -> String {
    "strictly_tictactoe.db".to_string()
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            save_dir: default_save_dir(),
            db_path: default_db_path(),
        }
    }
}

impl SaveConfig {
    /// Loads configuration from TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(backend = ?config.backend, "Config loaded successfully");
        Ok(config)
    }

    /// Loads configuration from `path`, or defaults if there is no such file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Overrides the backend kind.
    pub fn with_backend(mut self, backend: StoreBackend) -> Self {
        self.backend = backend;
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: SaveConfig = toml::from_str("").expect("Parse failed");
        assert_eq!(config, SaveConfig::default());
    }

    #[test]
    fn test_sqlite_backend() {
        let config: SaveConfig =
            toml::from_str("backend = \"sqlite\"\ndb_path = \"games.db\"").expect("Parse failed");
        assert_eq!(*config.backend(), StoreBackend::Sqlite);
        assert_eq!(config.db_path(), "games.db");
        assert_eq!(config.save_dir(), &PathBuf::from("saves"));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config =
            SaveConfig::load_or_default(dir.path().join("absent.toml")).expect("Load failed");
        assert_eq!(config, SaveConfig::default());
    }

    #[test]
    fn test_bad_file_is_error() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "backend = \"floppy\"").expect("Write failed");
        assert!(SaveConfig::load_or_default(&path).is_err());
    }
}
