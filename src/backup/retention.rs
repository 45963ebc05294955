//! Retention pruning
//!
//! Keeps at most `retention_limit` archives in the destination directory by
//! deleting the oldest ones. Archives are named with a chronologically
//! sortable timestamp, so ascending filename order is ascending age; the
//! naming scheme upholds that contract, this module relies on it.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{VaultError, VaultResult};

/// Outcome of one pruning pass
#[derive(Debug, Default)]
pub struct PruneOutcome {
    /// Archives that were deleted, oldest first
    pub deleted: Vec<PathBuf>,
    /// Per-file deletion failures; these did not stop the pass
    pub errors: Vec<VaultError>,
}

/// Deletes the oldest archives beyond the retention limit
pub struct RetentionPruner {
    directory: PathBuf,
    suffix: String,
    retention_limit: u32,
}

impl RetentionPruner {
    /// Create a pruner over `directory` for files ending in `suffix`
    /// (e.g. ".zip"), keeping at most `retention_limit` of them
    pub fn new(directory: impl Into<PathBuf>, suffix: impl Into<String>, retention_limit: u32) -> Self {
        Self {
            directory: directory.into(),
            suffix: suffix.into(),
            retention_limit,
        }
    }

    /// List matching archive files, sorted by filename ascending
    pub fn list_archives(&self) -> VaultResult<Vec<PathBuf>> {
        let entries = fs::read_dir(&self.directory).map_err(|e| {
            VaultError::Io(format!(
                "Failed to read {}: {}",
                self.directory.display(),
                e
            ))
        })?;

        let mut archives = Vec::new();
        for entry in entries {
            let entry =
                entry.map_err(|e| VaultError::Io(format!("Failed to read directory entry: {}", e)))?;

            let path = entry.path();
            let matches = path.is_file()
                && path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .map(|name| name.ends_with(&self.suffix))
                    .unwrap_or(false);

            if matches {
                archives.push(path);
            }
        }

        // Filename order is chronological order under the timestamp naming
        // convention.
        archives.sort();
        Ok(archives)
    }

    /// Delete the oldest archives beyond the retention limit
    ///
    /// If the count is within the limit, nothing is deleted. Each deletion
    /// is independent: a failure is recorded in the outcome and the rest of
    /// the pass continues.
    pub fn prune(&self) -> VaultResult<PruneOutcome> {
        let archives = self.list_archives()?;
        let mut outcome = PruneOutcome::default();

        if archives.len() <= self.retention_limit as usize {
            return Ok(outcome);
        }

        let excess = archives.len() - self.retention_limit as usize;

        // The oldest files are at the front of the sorted list.
        for path in archives.into_iter().take(excess) {
            match fs::remove_file(&path) {
                Ok(()) => outcome.deleted.push(path),
                Err(e) => outcome.errors.push(VaultError::Prune {
                    path,
                    reason: e.to_string(),
                }),
            }
        }

        Ok(outcome)
    }
}
