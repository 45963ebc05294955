//! User settings for itemvault
//!
//! Manages the backup configuration: where to read item files from, where to
//! write archives, how many archives to retain, the archive naming prefix,
//! and the journal severity threshold.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::VaultPaths;
use crate::error::VaultError;
use crate::journal::LogLevel;

/// User settings for itemvault
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Directory tree the item files are read from
    pub source_directory: PathBuf,

    /// Directory the archives (and the per-run staging directory) live in
    pub destination_directory: PathBuf,

    /// Maximum number of archives kept; oldest-by-name are deleted first
    #[serde(default = "default_retention_limit")]
    pub retention_limit: u32,

    /// Prefix for archive and staging directory names
    /// (e.g. "items" -> items_2025_06_27_1447.zip)
    #[serde(default = "default_archive_prefix")]
    pub archive_prefix: String,

    /// Minimum severity written to the run journal
    #[serde(default)]
    pub log_level: LogLevel,
}

fn default_schema_version() -> u32 {
    1
}

fn default_retention_limit() -> u32 {
    10
}

fn default_archive_prefix() -> String {
    "items".to_string()
}

impl Settings {
    /// Create settings for the given source and destination directories,
    /// with defaults for everything else
    pub fn new(source_directory: PathBuf, destination_directory: PathBuf) -> Self {
        Self {
            schema_version: default_schema_version(),
            source_directory,
            destination_directory,
            retention_limit: default_retention_limit(),
            archive_prefix: default_archive_prefix(),
            log_level: LogLevel::default(),
        }
    }

    /// Validate settings values that serde cannot enforce
    ///
    /// Directory existence is checked at run time by the orchestrator, not
    /// here, so a settings file can be written before the directories exist.
    pub fn validate(&self) -> Result<(), VaultError> {
        if self.retention_limit == 0 {
            return Err(VaultError::Config(
                "retention_limit must be at least 1".into(),
            ));
        }

        if self.archive_prefix.is_empty() {
            return Err(VaultError::Config("archive_prefix must not be empty".into()));
        }

        // The prefix lands in filenames; separators would nest the archive
        // under unintended directories.
        if self.archive_prefix.contains('/') || self.archive_prefix.contains('\\') {
            return Err(VaultError::Config(
                "archive_prefix must not contain path separators".into(),
            ));
        }

        Ok(())
    }

    /// Load settings from disk
    ///
    /// # Errors
    ///
    /// Returns `Config` if the settings file does not exist or cannot be
    /// parsed, and `Io` if it cannot be read.
    pub fn load(paths: &VaultPaths) -> Result<Self, VaultError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Err(VaultError::Config(format!(
                "Settings file not found: {} (run 'itemvault config --source <dir> --destination <dir>' or pass --source/--destination)",
                settings_path.display()
            )));
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| VaultError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| VaultError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &VaultPaths) -> Result<(), VaultError> {
        self.validate()?;

        // Ensure the config directory exists
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| VaultError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(&settings_path, contents)
            .map_err(|e| VaultError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
