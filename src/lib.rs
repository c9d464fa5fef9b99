//! # dv-save-sync
//!
//! Keeps a Derail Valley savegame in step with a copy in a backup folder (a
//! second disk, a network share, a synced cloud folder).
//!
//! ## Overview
//!
//! The savegame is a single opaque file, so the only signal used is its
//! last-write time. Whichever side was written last wins:
//!
//! - local newer: the local savegame is copied to the upload location
//! - local older: the remote savegame is downloaded, optionally after a
//!   timestamped backup of the local one
//! - same: nothing happens
//! - local missing: the remote savegame can be restored
//!
//! ## Architecture
//!
//! - The sync core ([`sync`]) evaluates both files and performs at most one
//!   guarded copy, returning an [`result::OperationResult`] instead of logging
//!   or exiting
//! - Settings and platform paths ([`settings`], [`config`])
//! - Locating the game's save folder ([`locate`])
//! - Console flow, prompts and reporting ([`handlers`], [`prompt`], [`report`], [`logger`])

/// Platform-agnostic configuration directory management.
pub mod config;

/// Validation errors, evaluation errors and process exit statuses.
pub mod error;

/// Command handlers used by the `dv-save-sync` binary.
///
/// Handlers own all console output and map failures to exit statuses; the
/// sync core never prints or exits.
pub mod handlers;

/// Search for the Derail Valley save folder in the usual Steam libraries.
pub mod locate;

/// Logging configuration and utilities.
///
/// Console logging through `env_logger` plus an appending log file in the
/// config directory with size-based rotation.
pub mod logger;

/// Yes/no prompts behind a trait, with terminal and scripted implementations.
pub mod prompt;

/// Status report of both savegames, as console text or JSON.
pub mod report;

/// Accumulated messages and success flag of one operation.
pub mod result;

/// Persistent settings (`config.toml`).
pub mod settings;

/// Core synchronization logic.
///
/// - **Evaluate**: compare last-write times of the local and remote savegame
/// - **Push**: copy local over remote
/// - **Pull**: copy remote over local when local is older (or unconditionally when restoring)
/// - **Backup**: timestamped copy of the local savegame next to it
pub mod sync;

/// How much the CLI prints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbosityLevel {
    /// Warnings and errors only
    Quiet,
    /// Normal output
    Normal,
    /// Debug output
    Verbose,
}

impl VerbosityLevel {
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        if verbose {
            VerbosityLevel::Verbose
        } else if quiet {
            VerbosityLevel::Quiet
        } else {
            VerbosityLevel::Normal
        }
    }
}
