//! Game folder search handler

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use crate::error::{CommandError, ExitStatus};
use crate::locate;
use crate::settings::SyncConfig;

use super::report_result;

/// Look for the save folder in the usual Steam libraries, optionally storing it
pub fn handle_locate(config_path: &Path, save: bool) -> Result<()> {
    println!("{}", "Searching for Derail Valley...".cyan().bold());

    let (result, found) = locate::search_for_game_folder();
    report_result(&result);

    let Some(found) = found else {
        return Err(
            CommandError::new(ExitStatus::CouldNotFindPath, "Unable to find folder location.")
                .into(),
        );
    };

    if save {
        let mut config = SyncConfig::load_or_create(config_path)?;
        config.save_location = found;
        config.save_to(config_path)?;
        println!("{}", "Save location stored in configuration.".green());
    }

    Ok(())
}
