//! Configuration command handlers
//!
//! Shows the current settings or updates individual fields from CLI flags.

use anyhow::Result;
use colored::Colorize;
use std::path::{Path, PathBuf};

use crate::settings::{BackupPreference, SyncConfig};

/// Fields to change; `None` leaves a field as it is
#[derive(Debug, Default)]
pub struct ConfigUpdate {
    pub save_location: Option<PathBuf>,
    pub upload_location: Option<PathBuf>,
    pub backup_option: Option<BackupPreference>,
    pub include_backup_save_files: Option<bool>,
    pub allow_download_savegame: Option<bool>,
    pub keep_alive: Option<bool>,
}

impl ConfigUpdate {
    pub fn is_empty(&self) -> bool {
        self.save_location.is_none()
            && self.upload_location.is_none()
            && self.backup_option.is_none()
            && self.include_backup_save_files.is_none()
            && self.allow_download_savegame.is_none()
            && self.keep_alive.is_none()
    }

    fn apply(self, config: &mut SyncConfig) {
        if let Some(path) = self.save_location {
            println!(
                "  {} Save location: {}",
                "✓".green(),
                path.display()
            );
            config.save_location = path;
        }
        if let Some(path) = self.upload_location {
            println!(
                "  {} Upload location: {}",
                "✓".green(),
                path.display()
            );
            config.upload_location = path;
        }
        if let Some(option) = self.backup_option {
            println!("  {} Backup: {}", "✓".green(), option);
            config.backup_option = option;
        }
        if let Some(include) = self.include_backup_save_files {
            println!("  {} Include .bak files: {}", "✓".green(), include);
            config.include_backup_save_files = include;
        }
        if let Some(allow) = self.allow_download_savegame {
            println!("  {} Allow download: {}", "✓".green(), allow);
            config.allow_download_savegame = allow;
        }
        if let Some(keep_alive) = self.keep_alive {
            println!("  {} Keep alive: {}", "✓".green(), keep_alive);
            config.keep_alive = keep_alive;
        }
    }
}

/// Show the current configuration
pub fn handle_config_show(config_path: &Path) -> Result<()> {
    let config = SyncConfig::load_or_create(config_path)?;
    println!(
        "{} {}",
        "Config file:".bold(),
        config_path.display().to_string().cyan()
    );
    config.print();
    Ok(())
}

/// Apply `update` to the stored configuration
pub fn handle_config_update(config_path: &Path, update: ConfigUpdate) -> Result<()> {
    if update.is_empty() {
        println!(
            "{}",
            "Nothing to change. Use --show to see the current configuration.".yellow()
        );
        return Ok(());
    }

    let mut config = SyncConfig::load_or_create(config_path)?;
    update.apply(&mut config);
    config.save_to(config_path)?;

    println!("{}", "Configuration saved successfully!".green().bold());
    Ok(())
}
