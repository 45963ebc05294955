//! The `list` command: show archives in the destination directory

use std::path::PathBuf;
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use clap::Args;

use crate::backup::{RetentionPruner, ARCHIVE_SUFFIX};
use crate::config::VaultPaths;
use crate::error::VaultResult;

use super::{format_size, resolve_settings};

/// Arguments for `itemvault list`
#[derive(Args)]
pub struct ListArgs {
    /// Destination directory holding the archives (overrides the settings file)
    #[arg(short, long)]
    pub destination: Option<PathBuf>,

    /// Show detailed information
    #[arg(short, long)]
    pub verbose: bool,
}

/// List archives, oldest first
pub fn handle_list_command(paths: &VaultPaths, args: ListArgs) -> VaultResult<()> {
    let settings = resolve_settings(paths, args.destination.clone(), args.destination)?;

    let pruner = RetentionPruner::new(&settings.destination_directory, ARCHIVE_SUFFIX, u32::MAX);
    let archives = pruner.list_archives()?;

    if archives.is_empty() {
        println!("No archives found in {}.", settings.destination_directory.display());
        println!("Create one with: itemvault run");
        return Ok(());
    }

    println!("Archives in {}", settings.destination_directory.display());
    println!();

    for (i, path) in archives.iter().enumerate() {
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        let metadata = std::fs::metadata(path)?;
        let size = format_size(metadata.len());

        if args.verbose {
            let modified = metadata
                .modified()
                .ok()
                .map(format_timestamp)
                .unwrap_or_else(|| "unknown".to_string());
            println!(
                "{}. {}\n   Size: {}\n   Modified: {}\n",
                i + 1,
                name,
                size,
                modified
            );
        } else {
            println!("  {}. {} ({})", i + 1, name, size);
        }
    }

    println!();
    println!("Total: {} archive(s)", archives.len());

    Ok(())
}

/// Format a filesystem timestamp for display
fn format_timestamp(time: SystemTime) -> String {
    let datetime: DateTime<Utc> = time.into();
    datetime.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}
