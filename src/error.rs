//! Custom error types for itemvault
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.
//!
//! Errors fall into two groups: fatal errors that abort the current run
//! (`Config`, `PathNotFound`, `Staging`, `ArchiveWrite`) and per-file errors
//! that are recorded and skipped (`FileCopy`, `Prune`). The orchestrator
//! accumulates the per-file group into the run report instead of propagating
//! them.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for itemvault operations
#[derive(Error, Debug)]
pub enum VaultError {
    /// Configuration-related errors (bad or missing paths, invalid settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// A required directory does not exist
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// Staging directory could not be created or cleaned
    #[error("Staging error: {0}")]
    Staging(String),

    /// A single source file could not be copied into staging
    #[error("Failed to copy {path}: {reason}")]
    FileCopy { path: PathBuf, reason: String },

    /// Archive could not be written; no partial archive is left behind
    #[error("Archive write error: {0}")]
    ArchiveWrite(String),

    /// A single archive could not be deleted during pruning
    #[error("Failed to prune {path}: {reason}")]
    Prune { path: PathBuf, reason: String },

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),
}

// Implement From traits for common error types

impl From<std::io::Error> for VaultError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for VaultError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<zip::result::ZipError> for VaultError {
    fn from(err: zip::result::ZipError) -> Self {
        Self::ArchiveWrite(err.to_string())
    }
}

/// Result type alias for itemvault operations
pub type VaultResult<T> = Result<T, VaultError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = VaultError::Config("retention_limit must be at least 1".into());
        assert_eq!(
            err.to_string(),
            "Configuration error: retention_limit must be at least 1"
        );
    }

    #[test]
    fn test_path_not_found_display() {
        let err = VaultError::PathNotFound(PathBuf::from("/no/such/dir"));
        assert_eq!(err.to_string(), "Path not found: /no/such/dir");
    }

    #[test]
    fn test_per_file_error_display() {
        let err = VaultError::FileCopy {
            path: PathBuf::from("/src/a1b2"),
            reason: "permission denied".into(),
        };
        assert_eq!(err.to_string(), "Failed to copy /src/a1b2: permission denied");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let vault_err: VaultError = io_err.into();
        assert!(matches!(vault_err, VaultError::Io(_)));
    }
}
