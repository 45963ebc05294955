use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use itemvault::backup::RunStatus;
use itemvault::cli::{
    handle_list_command, handle_prune_command, handle_run_command, ListArgs, PruneArgs, RunArgs,
};
use itemvault::config::{Settings, VaultPaths};

/// Exit code for a run that completed with recorded per-file errors
const EXIT_PARTIAL: u8 = 2;

#[derive(Parser)]
#[command(
    name = "itemvault",
    version,
    about = "Rolling zip-archive backups for content-management item files",
    long_about = "itemvault backs up CMS item configuration files: it selects files \
                  named with 32-character hexadecimal identifiers, seals them into a \
                  timestamped flat zip archive, and prunes old archives beyond a \
                  retention limit. It is meant to be invoked periodically by an \
                  external scheduler."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one full backup pass
    Run(RunArgs),

    /// Delete old archives down to the retention limit
    Prune(PruneArgs),

    /// List archives in the destination directory
    List(ListArgs),

    /// Show or initialize the configuration
    Config {
        /// Source directory to store in the settings file
        #[arg(short, long, requires = "destination")]
        source: Option<PathBuf>,

        /// Destination directory to store in the settings file
        #[arg(short, long, requires = "source")]
        destination: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    match run_cli() {
        Ok(status) => match status {
            RunStatus::Success => ExitCode::SUCCESS,
            RunStatus::CompletedWithErrors => ExitCode::from(EXIT_PARTIAL),
        },
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> Result<RunStatus> {
    let cli = Cli::parse();
    let paths = VaultPaths::new()?;

    match cli.command {
        Commands::Run(args) => Ok(handle_run_command(&paths, args)?),
        Commands::Prune(args) => Ok(handle_prune_command(&paths, args)?),
        Commands::List(args) => {
            handle_list_command(&paths, args)?;
            Ok(RunStatus::Success)
        }
        Commands::Config {
            source: Some(source),
            destination: Some(destination),
        } => {
            let settings = Settings::new(source, destination);
            settings.save(&paths)?;
            println!("Settings written: {}", paths.settings_file().display());
            Ok(RunStatus::Success)
        }
        Commands::Config { .. } => {
            println!("itemvault Configuration");
            println!("=======================");
            println!("Config file:  {}", paths.settings_file().display());
            println!("Journal file: {}", paths.journal_file().display());

            if paths.is_initialized() {
                let settings = Settings::load(&paths)?;
                println!();
                println!("Settings:");
                println!("  Source:          {}", settings.source_directory.display());
                println!(
                    "  Destination:     {}",
                    settings.destination_directory.display()
                );
                println!("  Retention limit: {}", settings.retention_limit);
                println!("  Archive prefix:  {}", settings.archive_prefix);
                println!("  Log level:       {}", settings.log_level);
            } else {
                println!();
                println!("Not configured yet. Initialize with:");
                println!("  itemvault config --source <dir> --destination <dir>");
            }

            Ok(RunStatus::Success)
        }
    }
}
