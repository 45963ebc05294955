//! Backup system for itemvault
//!
//! Implements the timestamped-archive-with-retention pattern: select item
//! files from a source tree, stage copies, seal them into a flat zip
//! archive, and prune old archives past the retention limit.
//!
//! # Architecture
//!
//! - `FileSelector`: walks the source tree and yields valid backup candidates
//! - `ArchiveBuilder`: seals staged files into a single flat zip archive
//! - `RetentionPruner`: deletes the oldest archives beyond the retention limit
//! - `BackupOrchestrator`: sequences one full run and produces a `RunReport`
//!
//! # Archive naming
//!
//! Archives and the per-run staging directory are named
//! `<prefix>_<YYYY>_<MM>_<DD>_<HHMM>`, so lexicographic filename order is
//! chronological order. The pruner relies on that contract.

mod archive;
mod orchestrator;
mod retention;
mod selector;

pub use archive::ArchiveBuilder;
pub use orchestrator::{BackupOrchestrator, RunReport, RunStatus, ARCHIVE_SUFFIX};
pub use retention::{PruneOutcome, RetentionPruner};
pub use selector::{is_backup_candidate, FileSelector};
