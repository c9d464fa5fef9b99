//! Status handler

use anyhow::{anyhow, Result};
use std::path::Path;

use crate::report::StatusReport;
use crate::settings::SyncConfig;
use crate::sync::Synchronizer;

/// Show both savegames and what the next sync would do
pub fn handle_status(config_path: &Path, format: &str) -> Result<()> {
    let config = SyncConfig::load_or_create(config_path)?;
    let report = StatusReport::collect(&Synchronizer::new(config));

    match format.to_lowercase().as_str() {
        "json" => println!("{}", report.to_json()?),
        "text" => report.print_summary(),
        _ => return Err(anyhow!("Unsupported format: {format}")),
    }

    Ok(())
}
