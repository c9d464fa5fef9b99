mod backup;
mod endpoint;
mod plan;
mod pull;
mod push;
mod run;
mod state;
mod transfer;

pub use backup::{
    backup_save_file, backup_save_file_at, BackupPaths, BACKUP_INFIX, BACKUP_TIMESTAMP_FORMAT,
};
pub use endpoint::{companion_of, SyncEndpoint, COMPANION_EXTENSION, SAVEGAME_FILE_NAME};
pub use plan::{plan, AbortReason, SyncAction};
pub use run::SyncOutcome;
pub use state::{evaluate, CheckMode, SyncCompareState};

use chrono::Utc;
use std::path::{Path, PathBuf};

use crate::error::EvaluateError;
use crate::result::OperationResult;
use crate::settings::SyncConfig;

/// Moves one savegame between its local and remote location.
///
/// Owns the configuration for the duration of a run; the only field it
/// changes is `last_updated`, after a transfer succeeds. Hand the
/// configuration back with [`Synchronizer::into_config`] to persist it.
#[derive(Debug)]
pub struct Synchronizer {
    config: SyncConfig,
    local: SyncEndpoint,
    remote: SyncEndpoint,
}

impl Synchronizer {
    /// Sync the savegames found in the configured save and upload locations
    pub fn new(config: SyncConfig) -> Self {
        let local = config.local_save_path();
        let remote = config.remote_save_path();
        Self::with_paths(config, local, remote)
    }

    /// Sync two explicit savegame files
    pub fn with_paths(
        config: SyncConfig,
        local: impl Into<PathBuf>,
        remote: impl Into<PathBuf>,
    ) -> Self {
        Synchronizer {
            config,
            local: SyncEndpoint::local(local),
            remote: SyncEndpoint::remote(remote),
        }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn into_config(self) -> SyncConfig {
        self.config
    }

    pub fn local(&self) -> &SyncEndpoint {
        &self.local
    }

    pub fn remote(&self) -> &SyncEndpoint {
        &self.remote
    }

    /// Compare the two savegames as they are on disk right now
    pub fn evaluate(&self, mode: CheckMode) -> Result<SyncCompareState, EvaluateError> {
        evaluate(&self.local, &self.remote, mode)
    }

    fn mark_synced(&mut self) {
        self.config.last_updated = Utc::now();
    }

    /// Best-effort copy of the `.bak` companion; a failure is reported but not fatal
    fn copy_companion(&self, from: &Path, to: &Path, result: &mut OperationResult) {
        if !self.config.include_backup_save_files {
            return;
        }

        let from = companion_of(from);
        let to = companion_of(to);
        match transfer::copy_overwrite(&from, &to) {
            Ok(_) => result.add_message(format!(
                "Companion file copied to '{}'.",
                to.display()
            )),
            Err(e) => {
                log::warn!("Could not copy {} to {}: {}", from.display(), to.display(), e);
                result.add_message(format!(
                    "Companion file '{}' was not copied: {e}",
                    from.display()
                ));
            }
        }
    }

    fn log_sync_info(&self) {
        for endpoint in [&self.local, &self.remote] {
            match endpoint.modified() {
                Ok(time) => log::info!(
                    "{} file details: {} - {}",
                    endpoint.role(),
                    endpoint.path().display(),
                    chrono::DateTime::<chrono::Local>::from(time).format("%Y-%m-%d %H:%M:%S")
                ),
                Err(_) => log::info!(
                    "{} file details: {} - (missing)",
                    endpoint.role(),
                    endpoint.path().display()
                ),
            }
        }
    }
}
