use serde::Serialize;
use std::fmt;

use super::state::SyncCompareState;

/// Why a sync run refused to transfer anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AbortReason {
    /// Remote is newer but downloads are disabled
    DownloadsDisabled,
    /// Local is missing and downloads are disabled
    RestoreDisabled,
}

impl AbortReason {
    pub fn message(self) -> &'static str {
        match self {
            AbortReason::DownloadsDisabled => {
                "Remote savegame is newer, but downloading is not allowed."
            }
            AbortReason::RestoreDisabled => {
                "Local savegame is missing and cannot be restored: downloading is not allowed."
            }
        }
    }
}

/// The single step a sync run takes after evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncAction {
    /// Copy local over remote
    Push,
    /// Copy remote over local (backing up first when configured)
    Pull,
    /// Copy remote to local without the freshness guard
    Restore,
    /// Nothing to do
    NoOp,
    Abort(AbortReason),
}

impl fmt::Display for SyncAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncAction::Push => write!(f, "push local savegame to remote"),
            SyncAction::Pull => write!(f, "download remote savegame"),
            SyncAction::Restore => write!(f, "restore savegame from remote"),
            SyncAction::NoOp => write!(f, "nothing to do"),
            SyncAction::Abort(reason) => write!(f, "abort ({})", reason.message()),
        }
    }
}

/// Decide what to do for an evaluated pair.
///
/// Only meaningful when the remote savegame exists; without one the caller
/// pushes (first upload) instead of evaluating.
pub fn plan(state: SyncCompareState, allow_download: bool) -> SyncAction {
    match (state, allow_download) {
        (SyncCompareState::LocalNewer, _) => SyncAction::Push,
        (SyncCompareState::LocalOlder, true) => SyncAction::Pull,
        (SyncCompareState::LocalOlder, false) => SyncAction::Abort(AbortReason::DownloadsDisabled),
        (SyncCompareState::LocalSame, _) => SyncAction::NoOp,
        (SyncCompareState::LocalMissing, true) => SyncAction::Restore,
        (SyncCompareState::LocalMissing, false) => SyncAction::Abort(AbortReason::RestoreDisabled),
    }
}
