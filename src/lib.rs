//! itemvault - rolling zip-archive backups for content-management item files
//!
//! This library implements a timestamped-archive-with-retention pattern for
//! backing up CMS item configuration files: walk a source tree, select files
//! whose base name is a 32-character hexadecimal identifier, stage copies in
//! a per-run directory, seal them into a flat deflate-compressed zip archive,
//! and prune the oldest archives beyond a retention limit.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `journal`: Append-only per-run event journal
//! - `backup`: File selection, archive building, retention, orchestration
//! - `cli`: Command handlers for the `itemvault` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use itemvault::backup::BackupOrchestrator;
//! use itemvault::config::{Settings, VaultPaths};
//! use itemvault::journal::RunJournal;
//!
//! let paths = VaultPaths::new()?;
//! let settings = Settings::load(&paths)?;
//! let journal = RunJournal::new(paths.journal_file(), settings.log_level);
//!
//! let report = BackupOrchestrator::new(settings, journal).run()?;
//! println!("{}", report.summary());
//! ```

pub mod backup;
pub mod cli;
pub mod config;
pub mod error;
pub mod journal;

pub use error::{VaultError, VaultResult};
