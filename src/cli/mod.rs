//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the backup layer.

pub mod list;
pub mod prune;
pub mod run;

use std::path::PathBuf;

pub use list::{handle_list_command, ListArgs};
pub use prune::{handle_prune_command, PruneArgs};
pub use run::{handle_run_command, RunArgs};

use crate::config::{Settings, VaultPaths};
use crate::error::VaultResult;

/// Resolve settings from the settings file and command-line overrides
///
/// If both `source` and `destination` are given, the settings file is not
/// required; otherwise it is loaded and the given flags override it.
pub fn resolve_settings(
    paths: &VaultPaths,
    source: Option<PathBuf>,
    destination: Option<PathBuf>,
) -> VaultResult<Settings> {
    let mut settings = match (&source, &destination) {
        (Some(src), Some(dst)) => Settings::new(src.clone(), dst.clone()),
        _ => Settings::load(paths)?,
    };

    if let Some(src) = source {
        settings.source_directory = src;
    }
    if let Some(dst) = destination {
        settings.destination_directory = dst;
    }

    Ok(settings)
}

/// Format a file size in human-readable form
pub(crate) fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
