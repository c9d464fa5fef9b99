use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use dv_save_sync::config::ConfigManager;
use dv_save_sync::error::{exit_status_for, ExitStatus};
use dv_save_sync::handlers::{self, ConfigUpdate};
use dv_save_sync::settings::BackupPreference;
use dv_save_sync::{logger, prompt, VerbosityLevel};

#[derive(Parser)]
#[command(name = "dv-save-sync")]
#[command(about = "Keep your Derail Valley savegame in sync with a backup folder", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Use this config file instead of the default one
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Show debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only show warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Answer yes to every question
    #[arg(short, long, global = true)]
    yes: bool,

    /// Never ask; answer no to every question
    #[arg(long, global = true)]
    no_input: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Sync the savegame in whichever direction is newer (default)
    Sync,

    /// Overwrite the local savegame with the one in the upload location
    Restore,

    /// Copy the local savegame to the upload location
    Push,

    /// Download the remote savegame if it is newer than the local one
    Pull,

    /// Make a timestamped backup of the local savegame
    Backup,

    /// Show both savegames and what the next sync would do
    Status {
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Search the Steam libraries for the Derail Valley save folder
    Locate {
        /// Store the found folder as the save location
        #[arg(long)]
        save: bool,
    },

    /// Show or change settings
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Folder containing the game's savegame
        #[arg(long)]
        save_location: Option<PathBuf>,

        /// Folder the savegame is mirrored to
        #[arg(long)]
        upload_location: Option<PathBuf>,

        /// When to back up the local savegame
        #[arg(long, value_enum)]
        backup: Option<BackupPreference>,

        /// Also mirror the game's savegame.bak file
        #[arg(long)]
        include_backup_files: Option<bool>,

        /// Allow a newer remote savegame to overwrite the local one
        #[arg(long)]
        allow_download: Option<bool>,

        /// Wait for Enter before closing
        #[arg(long)]
        keep_alive: Option<bool>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let verbosity = VerbosityLevel::from_flags(cli.verbose, cli.quiet);
    if let Err(e) = logger::init_logger(verbosity) {
        eprintln!("Warning: Failed to initialize logger: {e:#}");
    }
    log::info!("Program start - {}", env!("CARGO_PKG_VERSION"));

    match run(cli) {
        Ok(()) => {
            log::debug!("{}", ExitStatus::NoErrors.default_message());
            ExitCode::SUCCESS
        }
        Err(e) => {
            let status = exit_status_for(&e);
            log::error!("{e:#}");
            log::error!("{}", status.default_message());
            logger::log_to_file(&format!("Exiting with status {}: {e:#}", status.code())).ok();
            ExitCode::from(status.code())
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config_path = match cli.config {
        Some(path) => path,
        None => ConfigManager::config_file_path()?,
    };

    match cli.command.unwrap_or(Commands::Sync) {
        Commands::Sync => {
            let mut prompter = prompt::select_prompter(cli.yes, cli.no_input);
            handlers::handle_sync(&config_path, prompter.as_mut())?;
        }
        Commands::Restore => handlers::handle_restore(&config_path)?,
        Commands::Push => handlers::handle_push(&config_path)?,
        Commands::Pull => handlers::handle_pull(&config_path)?,
        Commands::Backup => handlers::handle_backup(&config_path)?,
        Commands::Status { format } => handlers::handle_status(&config_path, &format)?,
        Commands::Locate { save } => handlers::handle_locate(&config_path, save)?,
        Commands::Config {
            show,
            save_location,
            upload_location,
            backup,
            include_backup_files,
            allow_download,
            keep_alive,
        } => {
            if show {
                handlers::handle_config_show(&config_path)?;
            } else {
                handlers::handle_config_update(
                    &config_path,
                    ConfigUpdate {
                        save_location,
                        upload_location,
                        backup_option: backup,
                        include_backup_save_files: include_backup_files,
                        allow_download_savegame: allow_download,
                        keep_alive,
                    },
                )?;
            }
        }
    }

    Ok(())
}
