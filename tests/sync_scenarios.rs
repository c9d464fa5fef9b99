//! End-to-end sync scenarios against real files in temporary directories.

use dv_save_sync::settings::{BackupPreference, SyncConfig};
use dv_save_sync::sync::{
    backup_save_file_at, AbortReason, CheckMode, SyncAction, SyncCompareState, Synchronizer,
    BACKUP_INFIX,
};
use filetime::{set_file_mtime, FileTime};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

/// Game save folder and upload folder side by side
struct Folders {
    _temp: TempDir,
    save: PathBuf,
    upload: PathBuf,
}

impl Folders {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let save = temp.path().join("SaveGameData");
        let upload = temp.path().join("Saves");
        fs::create_dir_all(&save).unwrap();
        fs::create_dir_all(&upload).unwrap();
        Folders {
            _temp: temp,
            save,
            upload,
        }
    }

    fn config(&self, allow_download: bool, backup: BackupPreference) -> SyncConfig {
        SyncConfig {
            save_location: self.save.clone(),
            upload_location: self.upload.clone(),
            backup_option: backup,
            allow_download_savegame: allow_download,
            include_backup_save_files: true,
            ..Default::default()
        }
    }

    fn local(&self) -> PathBuf {
        self.save.join("savegame")
    }

    fn remote(&self) -> PathBuf {
        self.upload.join("savegame")
    }
}

fn write_aged(path: &Path, contents: &[u8], age: Duration) {
    fs::write(path, contents).unwrap();
    let when = FileTime::from_system_time(SystemTime::now() - age);
    set_file_mtime(path, when).unwrap();
}

fn backups_in(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .filter(|name| name.contains(BACKUP_INFIX))
        .collect();
    names.sort();
    names
}

#[test]
fn test_first_run_uploads_then_second_run_is_a_no_op() {
    let folders = Folders::new();
    write_aged(&folders.local(), b"fresh career", Duration::from_secs(60));
    write_aged(
        &folders.save.join("savegame.bak"),
        b"previous career",
        Duration::from_secs(120),
    );

    let mut first = Synchronizer::new(folders.config(true, BackupPreference::OnlyInDanger));
    let outcome = first.run().unwrap();
    assert_eq!(outcome.action, SyncAction::Push);
    assert!(outcome.result.is_success(), "{}", outcome.result);
    assert_eq!(fs::read(folders.remote()).unwrap(), b"fresh career");
    assert_eq!(
        fs::read(folders.upload.join("savegame.bak")).unwrap(),
        b"previous career"
    );

    let config = first.into_config();
    let remote_written = fs::metadata(folders.remote()).unwrap().modified().unwrap();

    let mut second = Synchronizer::new(config);
    let outcome = second.run().unwrap();
    assert_eq!(outcome.state, Some(SyncCompareState::LocalSame));
    assert_eq!(outcome.action, SyncAction::NoOp);
    assert!(outcome.result.is_success());
    assert_eq!(
        fs::metadata(folders.remote()).unwrap().modified().unwrap(),
        remote_written
    );
}

#[test]
fn test_older_local_is_backed_up_then_replaced() {
    let folders = Folders::new();
    write_aged(&folders.local(), b"yesterday", Duration::from_secs(24 * 3600));
    write_aged(&folders.save.join("savegame.bak"), b"yesterday bak", Duration::from_secs(24 * 3600));
    write_aged(&folders.remote(), b"played on laptop", Duration::from_secs(3600));
    write_aged(&folders.upload.join("savegame.bak"), b"laptop bak", Duration::from_secs(3600));

    let config = folders.config(true, BackupPreference::OnlyInDanger);
    let last_updated = config.last_updated;
    let mut sync = Synchronizer::new(config);

    let outcome = sync.run().unwrap();
    assert_eq!(outcome.state, Some(SyncCompareState::LocalOlder));
    assert_eq!(outcome.action, SyncAction::Pull);
    assert!(outcome.result.is_success(), "{}", outcome.result);

    let backups = backups_in(&folders.save);
    assert_eq!(backups.len(), 2, "{backups:?}");
    let primary = backups.iter().find(|n| !n.ends_with("_bak.bak")).unwrap();
    let companion = backups.iter().find(|n| n.ends_with("_bak.bak")).unwrap();
    assert_eq!(fs::read(folders.save.join(primary)).unwrap(), b"yesterday");
    assert_eq!(fs::read(folders.save.join(companion)).unwrap(), b"yesterday bak");

    assert_eq!(fs::read(folders.local()).unwrap(), b"played on laptop");
    assert_eq!(
        fs::read(folders.save.join("savegame.bak")).unwrap(),
        b"laptop bak"
    );
    assert!(sync.config().last_updated > last_updated);
    assert_eq!(
        sync.evaluate(CheckMode::Strict).unwrap(),
        SyncCompareState::LocalSame
    );
}

#[test]
fn test_older_local_kept_when_downloads_disabled() {
    let folders = Folders::new();
    write_aged(&folders.local(), b"mine", Duration::from_secs(7200));
    write_aged(&folders.remote(), b"theirs", Duration::from_secs(60));

    let config = folders.config(false, BackupPreference::OnlyInDanger);
    let last_updated = config.last_updated;
    let mut sync = Synchronizer::new(config);

    let outcome = sync.run().unwrap();
    assert_eq!(outcome.action, SyncAction::Abort(AbortReason::DownloadsDisabled));
    assert!(outcome.result.is_policy_abort());
    assert_eq!(fs::read(folders.local()).unwrap(), b"mine");
    assert!(backups_in(&folders.save).is_empty());
    assert_eq!(sync.config().last_updated, last_updated);
}

#[test]
fn test_newer_local_is_never_downloaded_over() {
    let folders = Folders::new();
    write_aged(&folders.local(), b"mine", Duration::from_secs(60));
    write_aged(&folders.remote(), b"theirs", Duration::from_secs(7200));

    let mut sync = Synchronizer::new(folders.config(true, BackupPreference::OnlyInDanger));
    let result = sync.download_remote_to_local(CheckMode::Strict).unwrap();

    assert!(!result.is_success());
    assert!(result.is_policy_abort());
    assert_eq!(fs::read(folders.local()).unwrap(), b"mine");
    assert!(backups_in(&folders.save).is_empty());
}

#[test]
fn test_restore_after_losing_local_save() {
    let folders = Folders::new();
    write_aged(&folders.remote(), b"backed up career", Duration::from_secs(3600));

    let mut sync = Synchronizer::new(folders.config(true, BackupPreference::OnlyInDanger));
    let outcome = sync.run().unwrap();

    assert_eq!(outcome.state, Some(SyncCompareState::LocalMissing));
    assert_eq!(outcome.action, SyncAction::Restore);
    assert_eq!(fs::read(folders.local()).unwrap(), b"backed up career");
}

#[test]
fn test_manual_backup_uses_configured_save_location() {
    let folders = Folders::new();
    write_aged(&folders.local(), b"career", Duration::from_secs(60));
    let mut config = folders.config(true, BackupPreference::AlwaysBackup);
    config.include_backup_save_files = false;

    let at = chrono::Local::now();
    let result = backup_save_file_at(&config, at);
    assert!(result.is_success(), "{result}");

    let expected = format!("savegame-dvss_{}.bak", at.format("%Y-%d-%-m-%H-%M-%S"));
    assert_eq!(backups_in(&folders.save), vec![expected]);
    assert_eq!(fs::read(folders.local()).unwrap(), b"career");
}
