//! Backup run orchestration
//!
//! Sequences one full backup run: validate the configured directories, stage
//! copies of the selected item files, seal them into a timestamped zip
//! archive, remove the staging directory, and prune old archives down to the
//! retention limit.
//!
//! A run moves through the phases `Init -> Validating -> Staging ->
//! Archiving -> Pruning -> Done`. Validation and staging-directory failures
//! are fatal; per-file copy and prune failures are recorded in the run
//! report and skipped. The journal is optional output: a journal write
//! failure is recorded the same way and never aborts the backup. Because
//! staging works on copies, a failed archive step never loses source data,
//! and a re-run gets a fresh timestamp so it cannot collide with the
//! remains of a failed one.

use std::fs;
use std::path::PathBuf;

use chrono::Local;

use crate::config::Settings;
use crate::error::{VaultError, VaultResult};
use crate::journal::{LogLevel, RunJournal, RunPhase};

use super::archive::ArchiveBuilder;
use super::retention::RetentionPruner;
use super::selector::FileSelector;

/// Filename suffix of archive files in the destination directory
pub const ARCHIVE_SUFFIX: &str = ".zip";

/// Timestamp format embedded in staging and archive names; lexicographic
/// order of the resulting names is chronological order
const STAMP_FORMAT: &str = "%Y_%m_%d_%H%M";

/// Completion status of a run, for the caller/scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Everything succeeded
    Success,
    /// The run completed but some per-file operations failed
    CompletedWithErrors,
}

/// Summary of one backup run
#[derive(Debug)]
pub struct RunReport {
    /// The archive that was created
    pub archive_path: PathBuf,
    /// Candidate files copied into staging
    pub files_copied: usize,
    /// Files written into the archive
    pub files_archived: usize,
    /// Old archives deleted by retention pruning
    pub archives_pruned: usize,
    /// Recorded non-fatal errors (copy failures, prune failures, staging
    /// cleanup, journal writes)
    pub errors: Vec<VaultError>,
}

impl RunReport {
    /// Completion status derived from the recorded errors
    pub fn status(&self) -> RunStatus {
        if self.errors.is_empty() {
            RunStatus::Success
        } else {
            RunStatus::CompletedWithErrors
        }
    }

    /// One-line human-readable summary
    pub fn summary(&self) -> String {
        format!(
            "{} copied, {} archived, {} pruned, {} error(s)",
            self.files_copied,
            self.files_archived,
            self.archives_pruned,
            self.errors.len()
        )
    }
}

/// Sequences one full backup run
pub struct BackupOrchestrator {
    settings: Settings,
    journal: RunJournal,
}

impl BackupOrchestrator {
    /// Create an orchestrator for the given settings, journaling to the
    /// given per-run journal
    pub fn new(settings: Settings, journal: RunJournal) -> Self {
        Self { settings, journal }
    }

    /// Execute one backup run
    ///
    /// # Errors
    ///
    /// Returns the fatal error that aborted the run: `Config` for missing
    /// directories, `Staging` if the staging directory cannot be created,
    /// `ArchiveWrite` if the archive cannot be sealed. Per-file failures do
    /// not abort the run; they are returned inside the report.
    pub fn run(&self) -> VaultResult<RunReport> {
        let mut errors = Vec::new();

        self.note(
            LogLevel::Info,
            RunPhase::Init,
            "backup run started".into(),
            &mut errors,
        );

        // Phase: validating
        if let Err(e) = self.validate() {
            return Err(self.fail(e));
        }

        // Phase: staging
        let stamp_name = format!(
            "{}_{}",
            self.settings.archive_prefix,
            Local::now().format(STAMP_FORMAT)
        );
        let staging_dir = self.settings.destination_directory.join(&stamp_name);
        let archive_path = self
            .settings
            .destination_directory
            .join(format!("{}{}", stamp_name, ARCHIVE_SUFFIX));

        // Two runs in the same minute collide on both names. Fail before
        // touching anything; a collision points at a clock or scheduling
        // problem, not something worth retrying.
        if archive_path.exists() {
            return Err(self.fail(VaultError::Staging(format!(
                "archive for this timestamp already exists: {}",
                archive_path.display()
            ))));
        }

        // Non-recursive create: a name collision must fail deterministically,
        // never silently overwrite.
        if let Err(e) = fs::create_dir(&staging_dir) {
            return Err(self.fail(VaultError::Staging(format!(
                "failed to create staging directory {}: {}",
                staging_dir.display(),
                e
            ))));
        }

        let files_copied = match self.stage_candidates(&staging_dir, &mut errors) {
            Ok(count) => count,
            Err(e) => return Err(self.fail(e)),
        };

        self.note(
            LogLevel::Info,
            RunPhase::Staging,
            format!("staged {} file(s) in {}", files_copied, staging_dir.display()),
            &mut errors,
        );

        // Phase: archiving
        let files_archived = match self.build_archive(&staging_dir, &archive_path) {
            Ok(count) => count,
            Err(e) => return Err(self.fail(e)),
        };

        self.note(
            LogLevel::Info,
            RunPhase::Archiving,
            format!("archive created: {}", archive_path.display()),
            &mut errors,
        );

        // The archive builder deleted every staged file it sealed, so the
        // staging directory should now be empty. A leftover means an
        // incomplete archive step: loud, but the retention step still runs.
        if let Err(e) = fs::remove_dir(&staging_dir) {
            self.note(
                LogLevel::Critical,
                RunPhase::Archiving,
                format!(
                    "staging directory not removed ({}): {}",
                    staging_dir.display(),
                    e
                ),
                &mut errors,
            );
            errors.push(VaultError::Staging(format!(
                "staging directory not removed ({}): {}",
                staging_dir.display(),
                e
            )));
        }

        // Phase: pruning
        let archives_pruned = self.prune_archives(&mut errors)?;

        let mut report = RunReport {
            archive_path,
            files_copied,
            files_archived,
            archives_pruned,
            errors,
        };

        self.note(
            LogLevel::Info,
            RunPhase::Done,
            format!("backup run complete: {}", report.summary()),
            &mut report.errors,
        );

        Ok(report)
    }

    /// Check that the configured directories exist
    fn validate(&self) -> VaultResult<()> {
        self.settings.validate()?;

        if !self.settings.source_directory.is_dir() {
            return Err(VaultError::Config(format!(
                "source directory does not exist: {}",
                self.settings.source_directory.display()
            )));
        }

        if !self.settings.destination_directory.is_dir() {
            return Err(VaultError::Config(format!(
                "destination directory does not exist: {}",
                self.settings.destination_directory.display()
            )));
        }

        Ok(())
    }

    /// Copy every valid candidate into the staging directory
    ///
    /// Individual copy failures are recorded and skipped.
    fn stage_candidates(
        &self,
        staging_dir: &std::path::Path,
        errors: &mut Vec<VaultError>,
    ) -> VaultResult<usize> {
        let selector = FileSelector::new(&self.settings.source_directory);
        let mut copied = 0usize;

        for source in selector.candidates()? {
            // Candidates always have a valid UTF-8 base name; the predicate
            // checked it during selection.
            let Some(file_name) = source.file_name() else {
                continue;
            };
            let staged = staging_dir.join(file_name);

            match fs::copy(&source, &staged) {
                Ok(_) => {
                    copied += 1;
                    self.note(
                        LogLevel::Debug,
                        RunPhase::Staging,
                        format!("copied {}", source.display()),
                        errors,
                    );
                }
                Err(e) => {
                    self.note(
                        LogLevel::Warning,
                        RunPhase::Staging,
                        format!("failed to copy {}: {}", source.display(), e),
                        errors,
                    );
                    errors.push(VaultError::FileCopy {
                        path: source,
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok(copied)
    }

    /// Seal the staged files into the archive
    fn build_archive(
        &self,
        staging_dir: &std::path::Path,
        archive_path: &std::path::Path,
    ) -> VaultResult<usize> {
        let entries = fs::read_dir(staging_dir)
            .map_err(|e| VaultError::Staging(format!("failed to read staging directory: {}", e)))?;

        let mut staged: Vec<PathBuf> = Vec::new();
        for entry in entries {
            let entry = entry
                .map_err(|e| VaultError::Staging(format!("failed to read staged entry: {}", e)))?;
            staged.push(entry.path());
        }
        staged.sort();

        ArchiveBuilder::new(archive_path).build(staged)
    }

    /// Prune old archives; a listing failure is recorded, not fatal
    fn prune_archives(&self, errors: &mut Vec<VaultError>) -> VaultResult<usize> {
        let pruner = RetentionPruner::new(
            &self.settings.destination_directory,
            ARCHIVE_SUFFIX,
            self.settings.retention_limit,
        );

        match pruner.prune() {
            Ok(outcome) => {
                for deleted in &outcome.deleted {
                    self.note(
                        LogLevel::Info,
                        RunPhase::Pruning,
                        format!("pruned {}", deleted.display()),
                        errors,
                    );
                }
                for error in &outcome.errors {
                    self.note(LogLevel::Warning, RunPhase::Pruning, error.to_string(), errors);
                }
                let pruned = outcome.deleted.len();
                errors.extend(outcome.errors);
                Ok(pruned)
            }
            Err(e) => {
                self.note(LogLevel::Error, RunPhase::Pruning, e.to_string(), errors);
                errors.push(e);
                Ok(0)
            }
        }
    }

    /// Journal an event; a journal failure is recorded once and never
    /// aborts the run, the journal being optional output
    fn note(
        &self,
        level: LogLevel,
        phase: RunPhase,
        message: String,
        errors: &mut Vec<VaultError>,
    ) {
        if let Err(e) = self.journal.record(level, phase, message) {
            // One entry is enough; a broken journal fails on every write.
            if !errors.iter().any(|err| matches!(err, VaultError::Io(_))) {
                errors.push(e);
            }
        }
    }

    /// Journal a fatal error and hand it back for propagation
    fn fail(&self, error: VaultError) -> VaultError {
        // Journaling must not mask the error being reported.
        let _ = self
            .journal
            .record(LogLevel::Error, RunPhase::Failed, error.to_string());
        error
    }
}
