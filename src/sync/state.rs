use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

use crate::error::{EvaluateError, ValidationError};

use super::endpoint::SyncEndpoint;

/// How the local savegame relates to the remote one right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncCompareState {
    /// Local was written after remote
    LocalNewer,
    /// Local was written before remote
    LocalOlder,
    /// Both carry the same last-write time
    LocalSame,
    /// There is no local savegame
    LocalMissing,
}

impl fmt::Display for SyncCompareState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SyncCompareState::LocalNewer => "local is newer",
            SyncCompareState::LocalOlder => "local is older",
            SyncCompareState::LocalSame => "local and remote are the same",
            SyncCompareState::LocalMissing => "local is missing",
        };
        write!(f, "{text}")
    }
}

/// How absent files are treated during evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckMode {
    /// Both files must exist
    Strict,
    /// A missing local file is a meaningful answer (restore and first-sync flows)
    MissingTolerant,
}

/// Compare the last-write times of `local` and `remote`.
///
/// In [`CheckMode::MissingTolerant`] a missing local file yields
/// [`SyncCompareState::LocalMissing`] without looking at the remote timestamp.
/// A missing remote file is always an error.
pub fn evaluate(
    local: &SyncEndpoint,
    remote: &SyncEndpoint,
    mode: CheckMode,
) -> Result<SyncCompareState, EvaluateError> {
    local.require_path()?;
    remote.require_path()?;

    if !local.exists() {
        if mode == CheckMode::MissingTolerant {
            return Ok(SyncCompareState::LocalMissing);
        }
        return Err(ValidationError::FileNotFound {
            role: local.role(),
            path: local.path().to_path_buf(),
        }
        .into());
    }
    remote.require_file()?;

    let local_time = local.modified().map_err(|source| EvaluateError::Timestamp {
        path: local.path().to_path_buf(),
        source,
    })?;
    let remote_time = remote.modified().map_err(|source| EvaluateError::Timestamp {
        path: remote.path().to_path_buf(),
        source,
    })?;

    let state = match local_time.cmp(&remote_time) {
        Ordering::Less => SyncCompareState::LocalOlder,
        Ordering::Equal => SyncCompareState::LocalSame,
        Ordering::Greater => SyncCompareState::LocalNewer,
    };
    log::debug!(
        "Compared {} with {}: {}",
        local.path().display(),
        remote.path().display(),
        state
    );

    Ok(state)
}
