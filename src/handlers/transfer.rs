//! Single-direction transfer handlers: push, pull and restore

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

use crate::error::{CommandError, ExitStatus};
use crate::result::OperationResult;
use crate::settings::SyncConfig;
use crate::sync::{CheckMode, Synchronizer};

use super::report_result;

/// Copy the local savegame to the upload location, whichever is newer
pub fn handle_push(config_path: &Path) -> Result<()> {
    println!("{}", "Pushing local savegame...".cyan().bold());
    let result = transfer(
        config_path,
        "Could not push local savegame to the upload location.",
        |sync| sync.push_local_to_remote(),
    )?;
    print_done(&result);
    Ok(())
}

/// Download the remote savegame if it is newer than the local one
pub fn handle_pull(config_path: &Path) -> Result<()> {
    println!("{}", "Downloading newer savegame...".cyan().bold());
    let result = transfer(
        config_path,
        "Could not download the remote savegame.",
        |sync| sync.download_remote_to_local(CheckMode::Strict),
    )?;
    print_done(&result);
    Ok(())
}

/// Overwrite the local savegame with the remote one, even if the local one is newer
pub fn handle_restore(config_path: &Path) -> Result<()> {
    const FAILED: &str = "Could not restore savegame files, please review logs.";

    println!("{}", "Restoring previous game saves...".cyan().bold());
    let result = transfer(config_path, FAILED, |sync| sync.restore_from_remote())?;

    // downloads being disabled is fatal here: restoring is all this command does
    if !result.is_success() {
        return Err(CommandError::new(ExitStatus::ErrorDuringOperations, FAILED).into());
    }

    println!("{}", "Save game files have been restored.".green().bold());
    Ok(())
}

fn print_done(result: &OperationResult) {
    if result.is_success() {
        println!("{}", "Done!".green().bold());
    } else {
        println!("{}", "Nothing was copied.".yellow());
    }
}

/// Run one transfer, persist the sync time on success.
///
/// Transfer failures become errors; policy refusals come back as a failed result.
fn transfer<F, E>(config_path: &Path, failure: &str, operation: F) -> Result<OperationResult>
where
    F: FnOnce(&mut Synchronizer) -> std::result::Result<OperationResult, E>,
    CommandError: From<E>,
{
    let config = SyncConfig::load_or_create(config_path)?;
    let mut sync = Synchronizer::new(config);

    let result = operation(&mut sync).map_err(CommandError::from)?;
    report_result(&result);

    if result.is_success() {
        sync.into_config()
            .save_to(config_path)
            .context("Failed to record the sync time")?;
    } else if !result.is_policy_abort() {
        return Err(CommandError::new(ExitStatus::ErrorDuringOperations, failure).into());
    }

    Ok(result)
}
