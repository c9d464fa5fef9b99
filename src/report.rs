use anyhow::{Context, Result};
use chrono::{DateTime, Local, Utc};
use colored::Colorize;
use serde::Serialize;

use crate::sync::{SyncAction, SyncCompareState, SyncEndpoint, Synchronizer};

/// Snapshot of one savegame location
#[derive(Debug, Serialize)]
pub struct EndpointStatus {
    pub path: String,
    pub exists: bool,
    /// RFC 3339 last-write time, if the file exists and it could be read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_write: Option<String>,
}

impl EndpointStatus {
    fn of(endpoint: &SyncEndpoint) -> Self {
        let last_write = endpoint
            .modified()
            .ok()
            .map(|time| DateTime::<Local>::from(time).to_rfc3339());

        EndpointStatus {
            path: endpoint.path().display().to_string(),
            exists: endpoint.exists(),
            last_write,
        }
    }
}

/// What `sync` would see and do right now
#[derive(Debug, Serialize)]
pub struct StatusReport {
    /// When this report was generated
    pub timestamp: String,
    pub local: EndpointStatus,
    pub remote: EndpointStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<SyncCompareState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planned_action: Option<SyncAction>,
    /// Why no action could be planned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub last_updated: DateTime<Utc>,
}

impl StatusReport {
    /// Inspect both savegames without changing anything
    pub fn collect(sync: &Synchronizer) -> Self {
        let (state, planned_action, error) = match sync.decide() {
            Ok((state, action)) => (state, Some(action), None),
            Err(e) => (None, None, Some(e.to_string())),
        };

        StatusReport {
            timestamp: Utc::now().to_rfc3339(),
            local: EndpointStatus::of(sync.local()),
            remote: EndpointStatus::of(sync.remote()),
            state,
            planned_action,
            error,
            last_updated: sync.config().last_updated,
        }
    }

    /// Generate a JSON report
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize status to JSON")
    }

    /// Print a colored console summary
    pub fn print_summary(&self) {
        println!("{}", "=== DV Save Sync Status ===".bold().cyan());
        println!();

        for (label, endpoint) in [("Local", &self.local), ("Remote", &self.remote)] {
            println!("{}", format!("{label}:").bold());
            println!("  Path: {}", endpoint.path);
            match &endpoint.last_write {
                Some(time) if endpoint.exists => println!("  Last write: {}", time.cyan()),
                _ => println!("  {}", "Missing".yellow()),
            }
        }

        println!();
        match (&self.state, &self.planned_action, &self.error) {
            (_, _, Some(error)) => println!("{}: {}", "Cannot sync".red().bold(), error),
            (state, Some(action), None) => {
                let state = state
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "no remote savegame yet".to_string());
                println!("{}: {}", "State".bold(), state);
                println!("{}: {}", "Next sync would".bold(), action.to_string().green());
            }
            _ => {}
        }
        println!(
            "{}: {}",
            "Last synced".bold(),
            self.last_updated
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
        );
    }
}
