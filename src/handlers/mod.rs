//! Command handler modules
//!
//! Each handler loads the configuration, drives the sync core and turns its
//! results into console output, log lines and exit statuses.

pub mod backup;
pub mod config;
pub mod locate;
pub mod status;
pub mod sync;
pub mod transfer;

pub use backup::handle_backup;
pub use config::{handle_config_show, handle_config_update, ConfigUpdate};
pub use locate::handle_locate;
pub use status::handle_status;
pub use sync::handle_sync;
pub use transfer::{handle_pull, handle_push, handle_restore};

use colored::Colorize;

use crate::logger;
use crate::result::OperationResult;

/// Print every message of `result` and record it in the log file
pub(crate) fn report_result(result: &OperationResult) {
    for message in result.messages() {
        if result.is_success() {
            println!("  {} {}", "✓".green(), message);
        } else {
            println!("  {} {}", "✗".red(), message.red());
            log::error!("{message}");
        }
        record(message);
    }
}

/// Write a line to the log file; a broken log file never stops a sync
pub(crate) fn record(message: &str) {
    if let Err(e) = logger::log_to_file(message) {
        log::debug!("Could not write to log file: {e:#}");
    }
}
