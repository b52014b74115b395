//! Theme preference persistence.
//!
//! The one piece of client state that survives reloads: a dark-mode boolean
//! stored under a fixed key in `~/.gesturedash/theme.json`. Everything else in
//! the dashboard is session-scoped.

use fs_err as fs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{DashError, Result};

const PREFERENCE_DIR: &str = ".gesturedash";
const THEME_FILE: &str = "theme.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ThemePreference {
    #[serde(default)]
    pub dark_mode: bool,
}

/// Returns the fixed theme preference path, or None when no home directory
/// can be resolved.
pub fn theme_preference_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(PREFERENCE_DIR).join(THEME_FILE))
}

/// Loads the theme preference, returning the default (light) on any read or
/// parse failure. A missing or corrupt file is not an error.
pub fn load_theme_preference() -> ThemePreference {
    theme_preference_path()
        .map(|path| load_from(&path))
        .unwrap_or_default()
}

/// Saves the theme preference to the fixed path.
pub fn save_theme_preference(preference: ThemePreference) -> Result<()> {
    let path = theme_preference_path().ok_or(DashError::PreferenceDirNotFound)?;
    save_to(&path, preference)
}

pub(crate) fn load_from(path: &Path) -> ThemePreference {
    fs::read_to_string(path)
        .ok()
        .and_then(|content| serde_json::from_str(&content).ok())
        .unwrap_or_default()
}

pub(crate) fn save_to(path: &Path, preference: ThemePreference) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| DashError::PreferenceWriteFailed {
            path: path.to_path_buf(),
            source,
        })?;
    }
    let content =
        serde_json::to_string_pretty(&preference).map_err(|err| DashError::PreferenceMalformed {
            path: path.to_path_buf(),
            details: err.to_string(),
        })?;
    fs::write(path, content).map_err(|source| DashError::PreferenceWriteFailed {
        path: path.to_path_buf(),
        source,
    })
}
