//! Finding the Derail Valley save folder in the usual Steam library locations.
//!
//! Only produces a directory path; it knows nothing about syncing.

use std::path::{Path, PathBuf};

use crate::result::{FailureKind, OperationResult};

/// Game folder name inside `steamapps/common`
pub const GAME_DIR_NAME: &str = "Derail Valley";

/// Save folder relative to the game folder
const SAVE_SUBDIR: [&str; 2] = ["DerailValley_Data", "SaveGameData"];

/// `<steam common dir>/Derail Valley/DerailValley_Data/SaveGameData`
pub fn save_folder_under(steam_common: &Path) -> PathBuf {
    SAVE_SUBDIR
        .iter()
        .fold(steam_common.join(GAME_DIR_NAME), |path, part| path.join(part))
}

/// Steam `steamapps/common` directories worth checking on this machine
pub fn candidate_roots() -> Vec<PathBuf> {
    let mut roots = Vec::new();

    if cfg!(target_os = "windows") {
        for letter in b'A'..=b'Z' {
            let drive = PathBuf::from(format!("{}:\\", letter as char));
            roots.push(
                drive
                    .join("Program Files (x86)")
                    .join("Steam")
                    .join("steamapps")
                    .join("common"),
            );
            roots.push(drive.join("SteamLibrary").join("steamapps").join("common"));
        }
        return roots;
    }

    if let Some(home) = dirs::home_dir() {
        roots.push(home.join(".steam").join("steam").join("steamapps").join("common"));
        roots.push(
            home.join(".var")
                .join("app")
                .join("com.valvesoftware.Steam")
                .join(".local")
                .join("share")
                .join("Steam")
                .join("steamapps")
                .join("common"),
        );
    }
    if let Some(data) = dirs::data_dir() {
        roots.push(data.join("Steam").join("steamapps").join("common"));
    }
    roots.dedup();
    roots
}

/// First save folder that exists under any of `roots`
pub fn find_save_folder<I, P>(roots: I) -> Option<PathBuf>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    roots.into_iter().find_map(|root| {
        let candidate = save_folder_under(root.as_ref());
        log::debug!("Checking: '{}'", candidate.display());
        candidate.is_dir().then_some(candidate)
    })
}

/// Search the default Steam locations for the save folder
pub fn search_for_game_folder() -> (OperationResult, Option<PathBuf>) {
    search_in(candidate_roots())
}

pub(crate) fn search_in(roots: Vec<PathBuf>) -> (OperationResult, Option<PathBuf>) {
    log::info!("Searching for the Derail Valley save folder...");
    let mut result = OperationResult::new();

    match find_save_folder(&roots) {
        Some(found) => {
            result.add_message(format!(
                "Found Derail Valley save game folder at: '{}'",
                found.display()
            ));
            (result, Some(found))
        }
        None => {
            result.add_failure_message(FailureKind::NotFound, "Unable to find folder location.");
            (result, None)
        }
    }
}
