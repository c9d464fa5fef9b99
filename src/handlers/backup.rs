//! Manual backup handler

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use crate::error::{CommandError, ExitStatus};
use crate::settings::SyncConfig;
use crate::sync;

use super::report_result;

/// Make a timestamped copy of the local savegame right now
pub fn handle_backup(config_path: &Path) -> Result<()> {
    let config = SyncConfig::load_or_create(config_path)?;
    println!("{}", "Backing up local savegame...".cyan().bold());

    let result = sync::backup_save_file(&config);
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
