//! Archive construction
//!
//! Seals a set of staged files into a single flat zip archive. Entries are
//! stored under their base filename only, deflate-compressed at the maximum
//! level, and each source file is deleted as soon as its entry has been
//! written.
//!
//! Deleting as we go means a mid-write failure can leave some sources
//! already gone. The archive file itself is always removed on failure, but
//! callers must hand this builder disposable copies (the orchestrator's
//! staging directory), never the originals.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{VaultError, VaultResult};

/// Maximum deflate level, for deterministic and smallest output
const DEFLATE_LEVEL: i32 = 9;

/// Builds a single flat zip archive from a set of source files
pub struct ArchiveBuilder {
    destination: PathBuf,
}

impl ArchiveBuilder {
    /// Create a builder that will write the archive at `destination`
    pub fn new(destination: impl Into<PathBuf>) -> Self {
        Self {
            destination: destination.into(),
        }
    }

    /// Get the destination archive path
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Write all source files into the archive and delete each one after
    /// its entry is written
    ///
    /// Returns the number of files archived. On success the archive is
    /// finalized and immutable.
    ///
    /// # Errors
    ///
    /// Returns `ArchiveWrite` if the destination already exists or any write
    /// fails. On failure the partial archive file is removed; source files
    /// deleted before the failure are not restored.
    pub fn build<I>(&self, sources: I) -> VaultResult<usize>
    where
        I: IntoIterator<Item = PathBuf>,
    {
        // Exclusive create: existence check and open are one atomic
        // operation, and a pre-existing archive is never opened at all.
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.destination)
            .map_err(|e| {
                VaultError::ArchiveWrite(format!(
                    "failed to create {}: {}",
                    self.destination.display(),
                    e
                ))
            })?;

        let result = self.write_entries(file, sources);

        if result.is_err() {
            // Never leave a partial archive behind. The create above was
            // exclusive, so this can only remove a file this run created.
            let _ = fs::remove_file(&self.destination);
        }

        result
    }

    fn write_entries<I>(&self, file: File, sources: I) -> VaultResult<usize>
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut writer = ZipWriter::new(file);
        let options = FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(DEFLATE_LEVEL));

        let mut archived = 0usize;

        for source in sources {
            let entry_name = source
                .file_name()
                .and_then(|name| name.to_str())
                .ok_or_else(|| {
                    VaultError::ArchiveWrite(format!(
                        "source has no usable filename: {}",
                        source.display()
                    ))
                })?;

            // Base filename only, so archive browsing is always flat.
            writer.start_file(entry_name, options).map_err(|e| {
                VaultError::ArchiveWrite(format!("failed to start entry {}: {}", entry_name, e))
            })?;

            let mut input = File::open(&source).map_err(|e| {
                VaultError::ArchiveWrite(format!("failed to open {}: {}", source.display(), e))
            })?;

            io::copy(&mut input, &mut writer).map_err(|e| {
                VaultError::ArchiveWrite(format!("failed to write {}: {}", entry_name, e))
            })?;

            // The entry is in the archive; the staged copy is now redundant.
            fs::remove_file(&source).map_err(|e| {
                VaultError::ArchiveWrite(format!("failed to delete {}: {}", source.display(), e))
            })?;

            archived += 1;
        }

        writer.finish().map_err(|e| {
            VaultError::ArchiveWrite(format!("failed to finalize archive: {}", e))
        })?;

        Ok(archived)
    }
}
