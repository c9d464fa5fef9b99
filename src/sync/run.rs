use serde::Serialize;

use crate::error::EvaluateError;
use crate::result::{FailureKind, OperationResult};

use super::plan::{plan, SyncAction};
use super::state::{CheckMode, SyncCompareState};
use super::Synchronizer;

/// What a sync run saw and did.
#[derive(Debug, Clone, Serialize)]
pub struct SyncOutcome {
    /// `None` when there was no remote savegame to compare against
    pub state: Option<SyncCompareState>,
    pub action: SyncAction,
    pub result: OperationResult,
}

impl Synchronizer {
    /// Work out which action a run would take, without touching any file.
    ///
    /// A missing remote savegame means a first upload, so no comparison is made.
    pub fn decide(&self) -> Result<(Option<SyncCompareState>, SyncAction), EvaluateError> {
        self.local.require_path()?;
        self.remote.require_path()?;

        if !self.remote.exists() {
            self.local.require_file()?;
            return Ok((None, SyncAction::Push));
        }

        let state = self.evaluate(CheckMode::MissingTolerant)?;
        Ok((Some(state), plan(state, self.config.allow_download_savegame)))
    }

    /// Evaluate both savegames and perform at most one transfer.
    pub fn run(&mut self) -> Result<SyncOutcome, EvaluateError> {
        let (state, action) = self.decide()?;
        match state {
            Some(state) => log::info!("Sync state: {state}, action: {action}"),
            None => log::info!("No remote savegame found, uploading local savegame"),
        }

        let result = match action {
            SyncAction::Push => self.push_local_to_remote()?,
            SyncAction::Pull => self.download_remote_to_local(CheckMode::Strict)?,
            SyncAction::Restore => self.download_remote_to_local(CheckMode::MissingTolerant)?,
            SyncAction::NoOp => {
                let mut result = OperationResult::new();
                result.add_message(
                    "Local and upload savegame files are the same! Nothing to do here.",
                );
                result
            }
            SyncAction::Abort(reason) => {
                let mut result = OperationResult::new();
                result.add_failure_message(FailureKind::PolicyAbort, reason.message());
                result
            }
        };

        Ok(SyncOutcome {
            state,
            action,
            result,
        })
    }
}
