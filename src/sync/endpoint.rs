use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::{EndpointRole, ValidationError};

/// File name the game uses for its savegame
pub const SAVEGAME_FILE_NAME: &str = "savegame";

/// Extension appended to a savegame for its companion file
pub const COMPANION_EXTENSION: &str = "bak";

/// One side of a sync: a savegame path plus its role.
///
/// Existence and last-write time are read from the filesystem on every call,
/// never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncEndpoint {
    role: EndpointRole,
    path: PathBuf,
}

impl SyncEndpoint {
    pub fn local(path: impl Into<PathBuf>) -> Self {
        SyncEndpoint {
            role: EndpointRole::Local,
            path: path.into(),
        }
    }

    pub fn remote(path: impl Into<PathBuf>) -> Self {
        SyncEndpoint {
            role: EndpointRole::Remote,
            path: path.into(),
        }
    }

    pub fn role(&self) -> EndpointRole {
        self.role
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Last-write time as currently reported by the filesystem
    pub fn modified(&self) -> io::Result<SystemTime> {
        fs::metadata(&self.path)?.modified()
    }

    /// Path of the game's companion file (`savegame` -> `savegame.bak`)
    pub fn companion_path(&self) -> PathBuf {
        companion_of(&self.path)
    }

    /// Fail if no path was configured
    pub fn require_path(&self) -> Result<(), ValidationError> {
        if self.path.as_os_str().is_empty() {
            return Err(ValidationError::EmptyPath(self.role));
        }
        Ok(())
    }

    /// Fail if the path is empty or the file does not exist
    pub fn require_file(&self) -> Result<(), ValidationError> {
        self.require_path()?;
        if !self.exists() {
            return Err(ValidationError::FileNotFound {
                role: self.role,
                path: self.path.clone(),
            });
        }
        Ok(())
    }
}

/// Append `.bak` to a file path without replacing any existing extension
pub fn companion_of(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(COMPANION_EXTENSION);
    PathBuf::from(name)
}
