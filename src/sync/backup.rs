use chrono::{DateTime, Local};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::result::{FailureKind, OperationResult};
use crate::settings::SyncConfig;

use super::endpoint::{companion_of, SAVEGAME_FILE_NAME};
use super::transfer;

/// Marker placed between the savegame name and the backup timestamp
pub const BACKUP_INFIX: &str = "-dvss_";

/// year-day-month-hour-minute-second, month without zero padding
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y-%d-%-m-%H-%M-%S";

/// Where the backups of one savegame taken at one instant go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupPaths {
    /// `savegame-dvss_<timestamp>.bak`
    pub primary: PathBuf,
    /// `savegame-dvss_<timestamp>_bak.bak`
    pub companion: PathBuf,
}

impl BackupPaths {
    pub fn for_savegame(savegame: &Path, at: DateTime<Local>) -> Self {
        let stem = savegame
            .file_name()
            .and_then(OsStr::to_str)
            .unwrap_or(SAVEGAME_FILE_NAME);
        let stamp = at.format(BACKUP_TIMESTAMP_FORMAT);
        let dir = savegame.parent().unwrap_or_else(|| Path::new("."));

        BackupPaths {
            primary: dir.join(format!("{stem}{BACKUP_INFIX}{stamp}.bak")),
            companion: dir.join(format!("{stem}{BACKUP_INFIX}{stamp}_bak.bak")),
        }
    }
}

/// Back up the savegame in the configured save location, stamped with the current time
pub fn backup_save_file(config: &SyncConfig) -> OperationResult {
    backup_save_file_at(config, Local::now())
}

/// Back up the savegame in the configured save location, stamped with `at`
pub fn backup_save_file_at(config: &SyncConfig, at: DateTime<Local>) -> OperationResult {
    backup_file(
        &config.local_save_path(),
        config.include_backup_save_files,
        at,
    )
}

/// Copy `savegame` (and optionally its companion) next to itself under a timestamped name.
///
/// Existing backups are never replaced; a second backup within the same second fails.
pub(crate) fn backup_file(
    savegame: &Path,
    include_companion: bool,
    at: DateTime<Local>,
) -> OperationResult {
    let mut result = OperationResult::new();
    let paths = BackupPaths::for_savegame(savegame, at);

    match transfer::copy_new(savegame, &paths.primary) {
        Ok(_) => {
            log::debug!("Backed up {} to {}", savegame.display(), paths.primary.display());
            result.add_message(format!(
                "Backed up savegame to '{}'.",
                paths.primary.display()
            ));
        }
        Err(e) => {
            result.add_failure_message(
                FailureKind::Transfer,
                format!(
                    "An error occurred while trying to backup '{}': {e}",
                    savegame.display()
                ),
            );
            return result;
        }
    }

    if include_companion {
        let companion = companion_of(savegame);
        match transfer::copy_new(&companion, &paths.companion) {
            Ok(_) => result.add_message(format!(
                "Backed up companion file to '{}'.",
                paths.companion.display()
            )),
            Err(e) => result.add_failure_message(
                FailureKind::Transfer,
                format!(
                    "An error occurred while trying to backup '{}': {e}",
                    companion.display()
                ),
            ),
        }
    }

    result
}
