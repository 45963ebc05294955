//! The `prune` command: retention pruning without a backup run

use std::path::PathBuf;

use clap::Args;

use crate::backup::{RetentionPruner, RunStatus, ARCHIVE_SUFFIX};
use crate::config::VaultPaths;
use crate::error::VaultResult;

use super::resolve_settings;

/// Arguments for `itemvault prune`
#[derive(Args)]
pub struct PruneArgs {
    /// Destination directory holding the archives (overrides the settings file)
    #[arg(short, long)]
    pub destination: Option<PathBuf>,

    /// Maximum number of archives to retain (overrides the settings file)
    #[arg(short, long)]
    pub retention_limit: Option<u32>,

    /// Skip confirmation and delete
    #[arg(short, long)]
    pub force: bool,
}

/// Prune old archives down to the retention limit
pub fn handle_prune_command(paths: &VaultPaths, args: PruneArgs) -> VaultResult<RunStatus> {
    // Pruning never reads the source tree; reuse the destination as a
    // stand-in source so a bare --destination invocation works.
    let mut settings = resolve_settings(paths, args.destination.clone(), args.destination)?;
    if let Some(limit) = args.retention_limit {
        settings.retention_limit = limit;
    }
    settings.validate()?;

    let pruner = RetentionPruner::new(
        &settings.destination_directory,
        ARCHIVE_SUFFIX,
        settings.retention_limit,
    );

    let archives = pruner.list_archives()?;
    let excess = archives.len().saturating_sub(settings.retention_limit as usize);

    if excess == 0 {
        println!("No archives to prune.");
        println!(
            "Retention limit is {}, found {} archive(s).",
            settings.retention_limit,
            archives.len()
        );
        return Ok(RunStatus::Success);
    }

    println!(
        "Retention limit is {}, found {} archive(s); {} to delete:",
        settings.retention_limit,
        archives.len(),
        excess
    );
    for path in archives.iter().take(excess) {
        println!("  {}", path.display());
    }

    if !args.force {
        println!();
        println!("To delete old archives, run again with --force.");
        return Ok(RunStatus::Success);
    }

    let outcome = pruner.prune()?;
    println!("Deleted {} archive(s).", outcome.deleted.len());

    for error in &outcome.errors {
        eprintln!("warning: {}", error);
    }

    if outcome.errors.is_empty() {
        Ok(RunStatus::Success)
    } else {
        Ok(RunStatus::CompletedWithErrors)
    }
}
