use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use mactheme_core::shared::constants::COMMAND_TIMEOUT;

/// Persistent defaults, overridden by command-line flags.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Per-invocation timeout for external commands.
    pub timeout_secs: u64,
    /// Whether `current` consults Night Shift to report `auto`.
    pub detect_auto: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timeout_secs: COMMAND_TIMEOUT.as_secs(),
            detect_auto: true,
        }
    }
}

impl Settings {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("mactheme").join("settings.json"))
    }

    pub fn load() -> Self {
        Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Missing or unreadable files yield the defaults.
    pub fn load_from(path: &Path) -> Self {
        let Ok(json) = fs::read_to_string(path) else {
            return Self::default();
        };
        match serde_json::from_str(&json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring invalid settings at {}: {e}", path.display());
                Self::default()
            }
        }
    }
}
