//! The `run` command: one full backup pass

use std::path::PathBuf;

use clap::Args;

use crate::backup::{BackupOrchestrator, RunStatus};
use crate::config::VaultPaths;
use crate::error::VaultResult;
use crate::journal::{LogLevel, RunJournal};

use super::resolve_settings;

/// Arguments for `itemvault run`
#[derive(Args)]
pub struct RunArgs {
    /// Source directory to back up (overrides the settings file)
    #[arg(short, long)]
    pub source: Option<PathBuf>,

    /// Destination directory for archives (overrides the settings file)
    #[arg(short, long)]
    pub destination: Option<PathBuf>,

    /// Maximum number of archives to retain (overrides the settings file)
    #[arg(short, long)]
    pub retention_limit: Option<u32>,

    /// Archive name prefix (overrides the settings file)
    #[arg(short, long)]
    pub prefix: Option<String>,

    /// Minimum severity written to the journal (overrides the settings file)
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,
}

/// Execute one backup run and print its summary
///
/// Returns the run's completion status; fatal errors propagate as `Err`.
pub fn handle_run_command(paths: &VaultPaths, args: RunArgs) -> VaultResult<RunStatus> {
    let mut settings = resolve_settings(paths, args.source, args.destination)?;

    if let Some(limit) = args.retention_limit {
        settings.retention_limit = limit;
    }
    if let Some(prefix) = args.prefix {
        settings.archive_prefix = prefix;
    }
    if let Some(level) = args.log_level {
        settings.log_level = level;
    }
    settings.validate()?;

    // The journal lives under the itemvault base dir, not the destination,
    // so pruning never touches it.
    paths.ensure_directories()?;
    let journal = RunJournal::new(paths.journal_file(), settings.log_level);

    println!("Backing up {}", settings.source_directory.display());

    let orchestrator = BackupOrchestrator::new(settings, journal);
    let report = orchestrator.run()?;

    println!("Archive created: {}", report.archive_path.display());
    println!("Summary: {}", report.summary());

    for error in &report.errors {
        eprintln!("warning: {}", error);
    }

    Ok(report.status())
}
