use chrono::Local;

use crate::error::{EvaluateError, ValidationError};
use crate::result::{FailureKind, OperationResult};

use super::backup::backup_file;
use super::plan::AbortReason;
use super::state::{CheckMode, SyncCompareState};
use super::transfer;
use super::Synchronizer;

impl Synchronizer {
    /// Copy the remote savegame over the local one.
    ///
    /// In [`CheckMode::Strict`] the local file must exist and must be older
    /// than the remote one, otherwise nothing is copied. In
    /// [`CheckMode::MissingTolerant`] (restore) the freshness guard is skipped
    /// and a missing local file is fine.
    pub fn download_remote_to_local(
        &mut self,
        mode: CheckMode,
    ) -> Result<OperationResult, ValidationError> {
        self.local.require_path()?;
        self.remote.require_file()?;
        if mode == CheckMode::Strict {
            self.local.require_file()?;
        }

        let mut result = OperationResult::new();

        let state = match self.evaluate(mode) {
            Ok(state) => state,
            Err(EvaluateError::Validation(e)) => return Err(e),
            Err(e) => {
                log::error!("{e}");
                result.add_failure_message(FailureKind::Transfer, e.to_string());
                return Ok(result);
            }
        };

        if mode == CheckMode::Strict && state != SyncCompareState::LocalOlder {
            log::warn!("Local file is NOT older than remote file, not downloading");
            result.add_failure_message(
                FailureKind::PolicyAbort,
                "Local file is NOT older than remote file... aborting download to preserve state.",
            );
            return Ok(result);
        }

        if !self.config.allow_download_savegame {
            let reason = if state == SyncCompareState::LocalMissing {
                AbortReason::RestoreDisabled
            } else {
                AbortReason::DownloadsDisabled
            };
            log::warn!("{}", reason.message());
            result.add_failure_message(FailureKind::PolicyAbort, reason.message());
            return Ok(result);
        }

        if self.config.backup_option.backs_up_before_download() && self.local.exists() {
            log::info!("Backing up local savegame before it is overwritten");
            let backup = backup_file(
                self.local.path(),
                self.config.include_backup_save_files,
                Local::now(),
            );
            if !backup.is_success() {
                log::warn!("Backup before download failed, downloading anyway");
            }
            // a failed backup does not block the download
            for message in backup.messages() {
                result.add_message(message.clone());
            }
        }

        self.log_sync_info();
        let local = self.local.path().to_path_buf();
        let remote = self.remote.path().to_path_buf();

        if let Err(e) = transfer::copy_overwrite(&remote, &local) {
            log::error!(
                "Could not download {} to {}: {}",
                remote.display(),
                local.display(),
                e
            );
            result.add_failure_message(
                FailureKind::Transfer,
                format!("Could not download remote file to local: {e}"),
            );
            return Ok(result);
        }

        self.copy_companion(&remote, &local, &mut result);
        self.mark_synced();
        result.add_message("Savegame has been updated from the upload location successfully!");

        Ok(result)
    }

    /// Pull the remote savegame regardless of which one is newer
    pub fn restore_from_remote(&mut self) -> Result<OperationResult, ValidationError> {
        self.download_remote_to_local(CheckMode::MissingTolerant)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::{EndpointRole, ValidationError};
    use crate::result::FailureKind;
    use crate::settings::{BackupPreference, SyncConfig};
    use crate::sync::{CheckMode, SyncCompareState, Synchronizer, BACKUP_INFIX};
    use filetime::{set_file_mtime, FileTime};
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    struct Fixture {
        temp: TempDir,
        local: PathBuf,
        remote: PathBuf,
    }

    fn fixture(local: Option<(&str, i64)>, remote: (&str, i64)) -> Fixture {
        let temp = TempDir::new().unwrap();
        let local_dir = temp.path().join("local");
        let remote_dir = temp.path().join("remote");
        fs::create_dir_all(&local_dir).unwrap();
        fs::create_dir_all(&remote_dir).unwrap();

        let local_path = local_dir.join("savegame");
        let remote_path = remote_dir.join("savegame");
        if let Some((contents, secs)) = local {
            write_at(&local_path, contents.as_bytes(), secs);
        }
        write_at(&remote_path, remote.0.as_bytes(), remote.1);

        Fixture {
            temp,
            local: local_path,
            remote: remote_path,
        }
    }

    fn write_at(path: &Path, contents: &[u8], secs: i64) {
        fs::write(path, contents).unwrap();
        set_file_mtime(path, FileTime::from_unix_time(secs, 0)).unwrap();
    }

    fn config(allow: bool, backup: BackupPreference) -> SyncConfig {
        SyncConfig {
            allow_download_savegame: allow,
            backup_option: backup,
            include_backup_save_files: false,
            ..Default::default()
        }
    }

    fn backups_in(dir: &Path) -> Vec<String> {
        fs::read_dir(dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().to_string())
            .filter(|name| name.contains(BACKUP_INFIX))
            .collect()
    }

    #[test]
    fn test_pull_overwrites_older_local() {
        let fx = fixture(Some(("old", 1_000)), ("new", 2_000));
        let mut sync = Synchronizer::with_paths(
            config(true, BackupPreference::DoNotBackup),
            &fx.local,
            &fx.remote,
        );
        let before = sync.config().last_updated;

        let result = sync.download_remote_to_local(CheckMode::Strict).unwrap();

        assert!(result.is_success(), "{result}");
        assert_eq!(fs::read(&fx.local).unwrap(), b"new");
        assert!(sync.config().last_updated > before);
        assert_eq!(
            sync.evaluate(CheckMode::Strict).unwrap(),
            SyncCompareState::LocalSame
        );
        assert!(backups_in(fx.local.parent().unwrap()).is_empty());
    }

    #[test]
    fn test_pull_refuses_newer_or_same_local() {
        for local_secs in [2_000, 3_000] {
            let fx = fixture(Some(("mine", local_secs)), ("theirs", 2_000));
            let mut sync = Synchronizer::with_paths(
                config(true, BackupPreference::DoNotBackup),
                &fx.local,
                &fx.remote,
            );
            let before = sync.config().last_updated;

            let result = sync.download_remote_to_local(CheckMode::Strict).unwrap();

            assert!(!result.is_success());
            assert!(result.is_policy_abort());
            assert!(result.messages()[0].contains("NOT older"));
            assert_eq!(fs::read(&fx.local).unwrap(), b"mine");
            assert_eq!(sync.config().last_updated, before);
        }
    }

    #[test]
    fn test_pull_respects_disabled_downloads() {
        let fx = fixture(Some(("old", 1_000)), ("new", 2_000));
        let mut sync = Synchronizer::with_paths(
            config(false, BackupPreference::OnlyInDanger),
            &fx.local,
            &fx.remote,
        );

        let result = sync.download_remote_to_local(CheckMode::Strict).unwrap();

        assert!(!result.is_success());
        assert_eq!(result.failure_kind(), Some(FailureKind::PolicyAbort));
        assert!(result.messages()[0].contains("downloading is not allowed"));
        assert_eq!(fs::read(&fx.local).unwrap(), b"old");
        assert!(backups_in(fx.local.parent().unwrap()).is_empty());
    }

    #[test]
    fn test_pull_backs_up_when_in_danger() {
        let fx = fixture(Some(("old", 1_000)), ("new", 2_000));
        let mut sync = Synchronizer::with_paths(
            config(true, BackupPreference::OnlyInDanger),
            &fx.local,
            &fx.remote,
        );

        let result = sync.download_remote_to_local(CheckMode::Strict).unwrap();
        assert!(result.is_success(), "{result}");

        let backups = backups_in(fx.local.parent().unwrap());
        assert_eq!(backups.len(), 1);
        assert!(backups[0].starts_with("savegame-dvss_"));
        assert!(backups[0].ends_with(".bak"));
        let backup = fx.local.parent().unwrap().join(&backups[0]);
        assert_eq!(fs::read(backup).unwrap(), b"old");
        assert_eq!(fs::read(&fx.local).unwrap(), b"new");
    }

    #[test]
    fn test_restore_ignores_freshness_guard() {
        let fx = fixture(Some(("mine", 3_000)), ("theirs", 2_000));
        let mut sync = Synchronizer::with_paths(
            config(true, BackupPreference::DoNotBackup),
            &fx.local,
            &fx.remote,
        );

        let result = sync.restore_from_remote().unwrap();
        assert!(result.is_success(), "{result}");
        assert_eq!(fs::read(&fx.local).unwrap(), b"theirs");
    }

    #[test]
    fn test_restore_into_missing_local() {
        let fx = fixture(None, ("theirs", 2_000));
        let mut sync = Synchronizer::with_paths(
            config(true, BackupPreference::OnlyInDanger),
            &fx.local,
            &fx.remote,
        );

        let result = sync.restore_from_remote().unwrap();
        assert!(result.is_success(), "{result}");
        assert_eq!(fs::read(&fx.local).unwrap(), b"theirs");
        // nothing to back up when there is no local save
        assert!(backups_in(fx.local.parent().unwrap()).is_empty());
    }

    #[test]
    fn test_restore_with_downloads_disabled() {
        let fx = fixture(None, ("theirs", 2_000));
        let mut sync = Synchronizer::with_paths(
            config(false, BackupPreference::DoNotBackup),
            &fx.local,
            &fx.remote,
        );

        let result = sync.restore_from_remote().unwrap();
        assert!(result.is_policy_abort());
        assert!(result.messages()[0].contains("cannot be restored"));
        assert!(!fx.local.exists());
    }

    #[test]
    fn test_strict_pull_requires_local_file() {
        let fx = fixture(None, ("theirs", 2_000));
        let mut sync = Synchronizer::with_paths(
            config(true, BackupPreference::DoNotBackup),
            &fx.local,
            &fx.remote,
        );

        match sync.download_remote_to_local(CheckMode::Strict) {
            Err(ValidationError::FileNotFound { role, .. }) => assert_eq!(role, EndpointRole::Local),
            other => panic!("expected missing local file, got {other:?}"),
        }
    }

    #[test]
    fn test_pull_requires_remote_file() {
        let fx = fixture(Some(("mine", 1_000)), ("theirs", 2_000));
        fs::remove_file(&fx.remote).unwrap();
        let mut sync = Synchronizer::with_paths(
            config(true, BackupPreference::DoNotBackup),
            &fx.local,
            &fx.remote,
        );

        for mode in [CheckMode::Strict, CheckMode::MissingTolerant] {
            assert!(matches!(
                sync.download_remote_to_local(mode),
                Err(ValidationError::FileNotFound {
                    role: EndpointRole::Remote,
                    ..
                })
            ));
        }
        drop(fx.temp);
    }

    #[test]
    fn test_pull_copies_companion_when_configured() {
        let fx = fixture(Some(("old", 1_000)), ("new", 2_000));
        fs::write(fx.remote.with_file_name("savegame.bak"), b"remote companion").unwrap();
        let mut cfg = config(true, BackupPreference::DoNotBackup);
        cfg.include_backup_save_files = true;
        let mut sync = Synchronizer::with_paths(cfg, &fx.local, &fx.remote);

        let result = sync.download_remote_to_local(CheckMode::Strict).unwrap();
        assert!(result.is_success(), "{result}");
        assert_eq!(
            fs::read(fx.local.with_file_name("savegame.bak")).unwrap(),
            b"remote companion"
        );
    }

    #[test]
    fn test_restore_from_the_same_folder_keeps_the_save() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("savegame"), b"seventeen bytes!!").unwrap();

        let mut sync = Synchronizer::new(SyncConfig {
            save_location: temp.path().to_path_buf(),
            upload_location: temp.path().to_path_buf(),
            ..config(true, BackupPreference::DoNotBackup)
        });
        let before = sync.config().last_updated;
        let result = sync.restore_from_remote().unwrap();

        assert!(!result.is_success());
        assert_eq!(result.failure_kind(), Some(FailureKind::Transfer));
        assert!(result.messages().iter().any(|m| m.contains("same file")));
        assert_eq!(
            fs::read(temp.path().join("savegame")).unwrap(),
            b"seventeen bytes!!"
        );
        assert_eq!(sync.config().last_updated, before);
    }
}
