//! Journal writer for the append-only run journal
//!
//! Provides the RunJournal struct that writes entries to a log file.
//! Each entry is written as a single JSON line and flushed immediately.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use crate::error::{VaultError, VaultResult};

use super::entry::{JournalEntry, LogLevel, RunPhase};

/// Writes journal entries at or above a minimum severity to a JSONL file
///
/// Entries below the threshold are dropped without touching the file.
pub struct RunJournal {
    /// Path to the journal file
    journal_path: PathBuf,
    /// Minimum severity that is written out
    min_level: LogLevel,
}

impl RunJournal {
    /// Create a new RunJournal that writes to the specified path
    pub fn new(journal_path: PathBuf, min_level: LogLevel) -> Self {
        Self {
            journal_path,
            min_level,
        }
    }

    /// Record an event
    ///
    /// Appends the entry as a JSON line if its level meets the threshold.
    /// Each write is flushed immediately to ensure durability.
    pub fn record(
        &self,
        level: LogLevel,
        phase: RunPhase,
        message: impl Into<String>,
    ) -> VaultResult<()> {
        if level < self.min_level {
            return Ok(());
        }

        let entry = JournalEntry::new(level, phase, message);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.journal_path)
            .map_err(|e| VaultError::Io(format!("Failed to open journal: {}", e)))?;

        let json = serde_json::to_string(&entry)
            .map_err(|e| VaultError::Json(format!("Failed to serialize journal entry: {}", e)))?;

        writeln!(file, "{}", json)
            .map_err(|e| VaultError::Io(format!("Failed to write journal entry: {}", e)))?;

        file.flush()
            .map_err(|e| VaultError::Io(format!("Failed to flush journal: {}", e)))?;

        Ok(())
    }

    /// Read all journal entries from the file
    ///
    /// Returns entries in chronological order (oldest first).
    pub fn read_all(&self) -> VaultResult<Vec<JournalEntry>> {
        if !self.journal_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.journal_path)
            .map_err(|e| VaultError::Io(format!("Failed to open journal: {}", e)))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                VaultError::Io(format!("Failed to read journal line {}: {}", line_num + 1, e))
            })?;

            // Skip empty lines
            if line.trim().is_empty() {
                continue;
            }

            let entry: JournalEntry = serde_json::from_str(&line).map_err(|e| {
                VaultError::Json(format!(
                    "Failed to parse journal entry at line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;

            entries.push(entry);
        }

        Ok(entries)
    }

    /// Check if the journal file exists
    pub fn exists(&self) -> bool {
        self.journal_path.exists()
    }

    /// Get the path to the journal file
    pub fn path(&self) -> &PathBuf {
        &self.journal_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_journal(min_level: LogLevel) -> (RunJournal, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let journal_path = temp_dir.path().join("journal.log");
        let journal = RunJournal::new(journal_path, min_level);
        (journal, temp_dir)
    }

    #[test]
    fn test_record_and_read() {
        let (journal, _temp) = create_test_journal(LogLevel::Info);

        journal
            .record(LogLevel::Info, RunPhase::Init, "run started")
            .unwrap();

        let entries = journal.read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].level, LogLevel::Info);
        assert_eq!(entries[0].phase, RunPhase::Init);
        assert_eq!(entries[0].message, "run started");
    }

    #[test]
    fn test_threshold_filters_entries() {
        let (journal, _temp) = create_test_journal(LogLevel::Warning);

        journal
            .record(LogLevel::Debug, RunPhase::Staging, "copied a file")
            .unwrap();
        journal
            .record(LogLevel::Info, RunPhase::Staging, "staging complete")
            .unwrap();
        journal
            .record(LogLevel::Warning, RunPhase::Pruning, "could not delete")
            .unwrap();
        journal
            .record(LogLevel::Error, RunPhase::Failed, "run failed")
            .unwrap();

        let entries = journal.read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].level, LogLevel::Warning);
        assert_eq!(entries[1].level, LogLevel::Error);
    }

    #[test]
    fn test_all_dropped_leaves_no_file() {
        let (journal, _temp) = create_test_journal(LogLevel::Error);

        journal
            .record(LogLevel::Info, RunPhase::Init, "run started")
            .unwrap();

        assert!(!journal.exists());
        assert!(journal.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_entries_accumulate_across_journals() {
        let (journal, temp) = create_test_journal(LogLevel::Info);

        journal
            .record(LogLevel::Info, RunPhase::Done, "first run complete")
            .unwrap();

        // A later run appends to the same file
        let journal2 = RunJournal::new(temp.path().join("journal.log"), LogLevel::Info);
        journal2
            .record(LogLevel::Info, RunPhase::Done, "second run complete")
            .unwrap();

        let entries = journal2.read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].message, "first run complete");
        assert_eq!(entries[1].message, "second run complete");
    }

    #[test]
    fn test_empty_journal() {
        let (journal, _temp) = create_test_journal(LogLevel::Info);

        assert!(!journal.exists());
        assert!(journal.read_all().unwrap().is_empty());
    }
}
