//! Error types for the sync core and the process exit codes the CLI maps them to.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which side of the sync an endpoint sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointRole {
    Local,
    Remote,
}

impl fmt::Display for EndpointRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndpointRole::Local => write!(f, "local"),
            EndpointRole::Remote => write!(f, "remote"),
        }
    }
}

/// Inputs that make an operation impossible to start.
///
/// Raised before any copy is attempted; the caller must not proceed.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required path was not configured.
    #[error("{0} save path is empty")]
    EmptyPath(EndpointRole),

    /// A file the operation needs does not exist.
    #[error("{role} file not found: '{}'", .path.display())]
    FileNotFound { role: EndpointRole, path: PathBuf },
}

/// Errors from comparing two endpoints.
#[derive(Debug, Error)]
pub enum EvaluateError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The file exists but its last-write time could not be read.
    #[error("could not read last-write time of '{}': {source}", .path.display())]
    Timestamp {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Process exit status, one per top-level error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    NoErrors = 0,
    CouldNotFindSaveFiles = 1,
    CouldNotFindPath = 2,
    ErrorDuringOperations = 3,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Message used when a command fails without saying more.
    pub fn default_message(self) -> &'static str {
        match self {
            ExitStatus::NoErrors => "Exiting normally.",
            ExitStatus::CouldNotFindSaveFiles => {
                "There was a problem trying to find the save files for Derail Valley."
            }
            ExitStatus::CouldNotFindPath => "There was a problem finding a path.",
            ExitStatus::ErrorDuringOperations => {
                "There was an error while trying to process operations. Please check the logs for more details."
            }
        }
    }
}

impl From<&ValidationError> for ExitStatus {
    fn from(err: &ValidationError) -> Self {
        match err {
            ValidationError::EmptyPath(_) => ExitStatus::CouldNotFindPath,
            ValidationError::FileNotFound { .. } => ExitStatus::CouldNotFindSaveFiles,
        }
    }
}

/// A command failure that carries the exit status it should end the process with.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct CommandError {
    pub status: ExitStatus,
    pub message: String,
}

impl CommandError {
    pub fn new(status: ExitStatus, message: impl Into<String>) -> Self {
        CommandError {
            status,
            message: message.into(),
        }
    }
}

impl From<ValidationError> for CommandError {
    fn from(err: ValidationError) -> Self {
        CommandError::new(ExitStatus::from(&err), err.to_string())
    }
}

/// Pick the exit status for an error that reached `main`.
pub fn exit_status_for(err: &anyhow::Error) -> ExitStatus {
    if let Some(cmd) = err.downcast_ref::<CommandError>() {
        return cmd.status;
    }
    if let Some(validation) = err.downcast_ref::<ValidationError>() {
        return validation.into();
    }
    if let Some(EvaluateError::Validation(validation)) = err.downcast_ref::<EvaluateError>() {
        return validation.into();
    }
    ExitStatus::ErrorDuringOperations
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_exit_codes_are_stable() {
        assert_eq!(ExitStatus::NoErrors.code(), 0);
        assert_eq!(ExitStatus::CouldNotFindSaveFiles.code(), 1);
        assert_eq!(ExitStatus::CouldNotFindPath.code(), 2);
        assert_eq!(ExitStatus::ErrorDuringOperations.code(), 3);
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::EmptyPath(EndpointRole::Remote);
        assert_eq!(err.to_string(), "remote save path is empty");

        let err = ValidationError::FileNotFound {
            role: EndpointRole::Local,
            path: PathBuf::from("/saves/savegame"),
        };
        assert_eq!(err.to_string(), "local file not found: '/saves/savegame'");
    }

    #[test]
    fn test_exit_status_from_anyhow_chain() {
        let err = anyhow::Error::new(CommandError::new(ExitStatus::CouldNotFindPath, "no dir"));
        assert_eq!(exit_status_for(&err), ExitStatus::CouldNotFindPath);

        let err = anyhow::Error::new(ValidationError::FileNotFound {
            role: EndpointRole::Remote,
            path: PathBuf::from("x"),
        })
        .context("Failed to pull");
        assert_eq!(exit_status_for(&err), ExitStatus::CouldNotFindSaveFiles);

        let err: anyhow::Result<()> = Err::<(), _>(std::io::Error::other("boom")).context("writing config");
        assert_eq!(
            exit_status_for(&err.unwrap_err()),
            ExitStatus::ErrorDuringOperations
        );
    }
}
