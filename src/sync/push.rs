use crate::error::ValidationError;
use crate::result::{FailureKind, OperationResult};

use super::transfer;
use super::Synchronizer;

impl Synchronizer {
    /// Copy the local savegame over the remote one.
    ///
    /// The remote file does not need to exist yet, so this is also the
    /// first-upload path. Filesystem errors end up in the returned result.
    pub fn push_local_to_remote(&mut self) -> Result<OperationResult, ValidationError> {
        self.local.require_file()?;
        self.remote.require_path()?;

        let mut result = OperationResult::new();
        self.log_sync_info();

        let local = self.local.path().to_path_buf();
        let remote = self.remote.path().to_path_buf();

        if let Err(e) = transfer::copy_overwrite(&local, &remote) {
            log::error!(
                "Could not push {} to {}: {}",
                local.display(),
                remote.display(),
                e
            );
            result.add_failure_message(
                FailureKind::Transfer,
                format!("Could not push local file to remote: {e}"),
            );
            return Ok(result);
        }

        self.copy_companion(&local, &remote, &mut result);
        self.mark_synced();
        result.add_message("Local files have been copied to the desired remote location.");

        Ok(result)
    }
}
