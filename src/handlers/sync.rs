//! The default console flow: check folders, back up if configured, sync, save.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;

use crate::error::{CommandError, ExitStatus};
use crate::locate;
use crate::prompt::Prompter;
use crate::settings::{PreSyncBackup, SyncConfig};
use crate::sync::{self, SyncAction, SyncEndpoint, SyncOutcome, Synchronizer};

use super::{record, report_result};

/// Run a full sync using the configuration stored at `config_path`
pub fn handle_sync(config_path: &Path, prompter: &mut dyn Prompter) -> Result<()> {
    println!("{}", "Syncing Derail Valley savegame...".cyan().bold());

    let mut config = SyncConfig::load_or_create(config_path)?;

    ensure_save_location(&mut config, config_path, prompter)?;
    ensure_upload_location(&config, prompter)?;

    log::info!("Inspecting game folder for save files...");
    if !SyncEndpoint::local(config.local_save_path()).exists() {
        return restore_missing_savegame(config, config_path, prompter);
    }

    backup_before_sync(&config, prompter)?;

    let mut synchronizer = Synchronizer::new(config);
    let outcome = synchronizer.run()?;
    print_outcome(&outcome);

    let config = synchronizer.into_config();
    config
        .save_to(config_path)
        .context("Failed to record the sync time")?;
    record("Sync completed");

    if config.keep_alive {
        prompter.pause()?;
    }

    if !outcome.result.is_success() && !outcome.result.is_policy_abort() {
        return Err(CommandError::new(
            ExitStatus::ErrorDuringOperations,
            "The savegame could not be synced. Please check the logs for more details.",
        )
        .into());
    }

    println!("{}", "DV Save Sync has completed.".green().bold());
    Ok(())
}

/// Make sure the save folder exists, offering a search of the Steam libraries when it does not
fn ensure_save_location(
    config: &mut SyncConfig,
    config_path: &Path,
    prompter: &mut dyn Prompter,
) -> Result<()> {
    if config.save_location.is_dir() {
        return Ok(());
    }

    log::warn!(
        "Save folder '{}' does not exist",
        config.save_location.display()
    );
    let search = prompter.confirm(
        "Could not find the Derail Valley save folder. Would you like to do a quick search?",
        true,
    )?;
    if !search {
        return Err(CommandError::new(
            ExitStatus::CouldNotFindPath,
            "Cannot continue without the savegame directory location.",
        )
        .into());
    }

    let (result, found) = locate::search_for_game_folder();
    report_result(&result);
    let Some(found) = found else {
        return Err(CommandError::new(
            ExitStatus::CouldNotFindPath,
            format!(
                "Could not find savegame directory: '{}'",
                config.save_location.display()
            ),
        )
        .into());
    };

    config.save_location = found;
    config.save_to(config_path)?;
    Ok(())
}

/// Make sure the upload folder exists, offering to create it
fn ensure_upload_location(config: &SyncConfig, prompter: &mut dyn Prompter) -> Result<()> {
    let upload = &config.upload_location;
    if upload.is_dir() {
        return Ok(());
    }

    log::warn!("The upload directory '{}' does not exist", upload.display());
    let create = prompter.confirm(
        &format!(
            "Upload location '{}' does not exist, create it?",
            upload.display()
        ),
        true,
    )?;
    if !create {
        return Err(CommandError::new(
            ExitStatus::CouldNotFindPath,
            "No upload location; cannot continue.",
        )
        .into());
    }

    fs::create_dir_all(upload)
        .with_context(|| format!("Failed to create upload directory: {}", upload.display()))?;
    println!("  {} {}", "Created".green(), upload.display());
    Ok(())
}

/// The save folder has no savegame: offer to pull the one from the upload location
fn restore_missing_savegame(
    config: SyncConfig,
    config_path: &Path,
    prompter: &mut dyn Prompter,
) -> Result<()> {
    let no_saves = || {
        CommandError::new(
            ExitStatus::CouldNotFindSaveFiles,
            "No savegame files found! Is the game directory location correct?",
        )
    };

    let download = prompter.confirm(
        "The savegame folder is empty. Would you like to download your files from the remote location?",
        false,
    )?;
    if !download {
        return Err(no_saves().into());
    }

    let mut synchronizer = Synchronizer::new(config);
    let result = synchronizer
        .restore_from_remote()
        .map_err(CommandError::from)?;
    report_result(&result);

    if !result.is_success() {
        return Err(no_saves().into());
    }

    synchronizer
        .into_config()
        .save_to(config_path)
        .context("Failed to record the sync time")?;
    println!("{}", "Savegame restored from the upload location.".green().bold());
    Ok(())
}

/// Apply the AlwaysBackup / AskForBackup preferences before anything is copied
fn backup_before_sync(config: &SyncConfig, prompter: &mut dyn Prompter) -> Result<()> {
    let wanted = match config.backup_option.before_sync() {
        PreSyncBackup::Skip => {
            log::info!("Redundant backups not desired, moving on...");
            false
        }
        PreSyncBackup::Backup => true,
        PreSyncBackup::Ask => {
            prompter.confirm("Would you like to backup the current savegame?", false)?
        }
    };
    if !wanted {
        return Ok(());
    }

    let result = sync::backup_save_file(config);
    report_result(&result);
    if !result.is_success() {
        return Err(CommandError::new(
            ExitStatus::ErrorDuringOperations,
            "There was an error backing up the files.",
        )
        .into());
    }
    Ok(())
}

fn print_outcome(outcome: &SyncOutcome) {
    let headline = match (outcome.state, outcome.action) {
        (None, _) => "No upload save found, copying local savegame to upload destination...",
        (_, SyncAction::Push) => "Local savegame is newer than upload savegame. Copying...",
        (_, SyncAction::Pull) => "Local savegame is older, downloading the newer savegame...",
        (_, SyncAction::Restore) => "Local savegame is missing, restoring from upload location...",
        (_, SyncAction::NoOp) => "Local and upload savegames match.",
        (_, SyncAction::Abort(_)) => "Not syncing:",
    };
    println!("{}", headline.bold());
    report_result(&outcome.result);
}
