//! Source file selection
//!
//! Walks the source directory tree and yields the files worth backing up.
//! CMS item configuration files are named with 32-character hexadecimal
//! identifiers; everything else in the tree (thumbnails, .xml metadata,
//! esriinfo folders) is skipped.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{VaultError, VaultResult};

/// Length of a valid item filename (hex-encoded 128-bit identifier)
const CANDIDATE_NAME_LEN: usize = 32;

/// Check whether a base filename identifies a backup candidate
///
/// A candidate name is exactly 32 characters long and parses entirely as
/// hexadecimal, in either case. This is ordinary control flow: a `false`
/// here is not an error, the file is simply not an item configuration file.
pub fn is_backup_candidate(file_name: &str) -> bool {
    file_name.len() == CANDIDATE_NAME_LEN && file_name.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Selects backup candidates from a source directory tree
///
/// The traversal is lazy and restartable: each call to [`candidates`]
/// starts a fresh walk. Order follows the directory traversal and is not
/// guaranteed sorted.
///
/// [`candidates`]: FileSelector::candidates
#[derive(Debug, Clone)]
pub struct FileSelector {
    root: PathBuf,
}

impl FileSelector {
    /// Create a selector rooted at the given directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Get the root directory being walked
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the tree and yield paths of valid backup candidates
    ///
    /// Unreadable directory entries are skipped, matching the walk's
    /// read-only, best-effort contract.
    ///
    /// # Errors
    ///
    /// Returns `PathNotFound` if the root directory does not exist.
    pub fn candidates(&self) -> VaultResult<impl Iterator<Item = PathBuf>> {
        if !self.root.is_dir() {
            return Err(VaultError::PathNotFound(self.root.clone()));
        }

        let iter = WalkDir::new(&self.root)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| {
                entry
                    .file_name()
                    .to_str()
                    .map(is_backup_candidate)
                    .unwrap_or(false)
            })
            .map(|entry| entry.into_path());

        Ok(iter)
    }
}
