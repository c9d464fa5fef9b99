use anyhow::{Context, Result};
use chrono::{DateTime, Local, TimeZone, Utc};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ConfigManager;
use crate::locate;
use crate::sync::SAVEGAME_FILE_NAME;

/// When to make a timestamped copy of the local savegame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum BackupPreference {
    /// Never back up
    DoNotBackup,
    /// Ask before every sync
    AskForBackup,
    /// Only right before the local save gets overwritten by a download
    OnlyInDanger,
    /// Back up before every sync
    AlwaysBackup,
}

/// What the console flow should do about a backup before it syncs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreSyncBackup {
    Skip,
    Ask,
    Backup,
}

impl BackupPreference {
    pub fn before_sync(self) -> PreSyncBackup {
        match self {
            BackupPreference::AlwaysBackup => PreSyncBackup::Backup,
            BackupPreference::AskForBackup => PreSyncBackup::Ask,
            // OnlyInDanger is handled by the download itself
            BackupPreference::DoNotBackup | BackupPreference::OnlyInDanger => PreSyncBackup::Skip,
        }
    }

    pub fn backs_up_before_download(self) -> bool {
        self == BackupPreference::OnlyInDanger
    }
}

impl fmt::Display for BackupPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BackupPreference::DoNotBackup => "never",
            BackupPreference::AskForBackup => "ask every time",
            BackupPreference::OnlyInDanger => "only before overwriting the local save",
            BackupPreference::AlwaysBackup => "always",
        };
        write!(f, "{name}")
    }
}

/// Persistent settings for dv-save-sync.
///
/// The sync core only reads `backup_option`, `allow_download_savegame` and
/// `include_backup_save_files`, and only ever writes `last_updated`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Directory the game writes its savegame into
    pub save_location: PathBuf,

    /// Backup/share directory the savegame is mirrored to
    pub upload_location: PathBuf,

    pub backup_option: BackupPreference,

    /// Last time a transfer completed successfully
    pub last_updated: DateTime<Utc>,

    /// Also mirror the game's own `savegame.bak` companion file
    pub include_backup_save_files: bool,

    /// Allow a newer remote savegame to overwrite the local one
    pub allow_download_savegame: bool,

    /// Wait for Enter before the console closes
    pub keep_alive: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig {
            save_location: default_save_location(),
            upload_location: ConfigManager::default_upload_dir()
                .unwrap_or_else(|_| PathBuf::from("Saves")),
            backup_option: BackupPreference::OnlyInDanger,
            last_updated: Utc
                .with_ymd_and_hms(2020, 5, 31, 21, 17, 34)
                .single()
                .unwrap_or_default(),
            include_backup_save_files: true,
            allow_download_savegame: true,
            keep_alive: true,
        }
    }
}

fn default_save_location() -> PathBuf {
    let steam_common = if cfg!(target_os = "windows") {
        PathBuf::from(r"C:\Program Files (x86)\Steam\steamapps\common")
    } else {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("Steam")
            .join("steamapps")
            .join("common")
    };
    locate::save_folder_under(&steam_common)
}

impl SyncConfig {
    /// Load from the default location, writing a default file first if none exists
    pub fn load() -> Result<Self> {
        Self::load_or_create(&ConfigManager::config_file_path()?)
    }

    /// Load configuration from `path`
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: SyncConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        log::debug!("Loaded config from {}", path.display());
        log::debug!("Local save path: {}", config.save_location.display());
        log::debug!("Upload path: {}", config.upload_location.display());

        Ok(config)
    }

    /// Load configuration from `path`, generating and saving the defaults when it is missing
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::warn!(
                "No config found at {}, generating default config file",
                path.display()
            );
            let config = Self::default();
            config.save_to(path)?;
            return Ok(config);
        }

        Self::load_from(path)
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        log::debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Full path of the local savegame
    pub fn local_save_path(&self) -> PathBuf {
        self.save_location.join(SAVEGAME_FILE_NAME)
    }

    /// Full path of the savegame in the upload location
    pub fn remote_save_path(&self) -> PathBuf {
        self.upload_location.join(SAVEGAME_FILE_NAME)
    }

    /// Print the configuration
    pub fn print(&self) {
        println!("{}", "Current Configuration:".bold());
        println!(
            "  {}: {}",
            "Save location".cyan(),
            self.save_location.display()
        );
        println!(
            "  {}: {}",
            "Upload location".cyan(),
            self.upload_location.display()
        );
        println!("  {}: {}", "Backup".cyan(), self.backup_option);
        println!(
            "  {}: {}",
            "Include .bak files".cyan(),
            self.include_backup_save_files
        );
        println!(
            "  {}: {}",
            "Allow download".cyan(),
            self.allow_download_savegame
        );
        println!("  {}: {}", "Keep alive".cyan(), self.keep_alive);
        println!(
            "  {}: {}",
            "Last updated".cyan(),
            self.last_updated
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
        );
    }
}
