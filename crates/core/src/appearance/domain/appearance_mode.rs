use std::fmt;
use std::str::FromStr;

use crate::shared::error::AppearanceError;

/// System-wide appearance mode.
///
/// `Auto` defers to the Night Shift schedule configured in System Settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppearanceMode {
    Light,
    Dark,
    Auto,
}

impl AppearanceMode {
    pub const ALL: &[AppearanceMode] = &[
        AppearanceMode::Light,
        AppearanceMode::Dark,
        AppearanceMode::Auto,
    ];

    /// Lowercase name used on the command line and in output.
    pub fn as_str(&self) -> &'static str {
        match self {
            AppearanceMode::Light => "light",
            AppearanceMode::Dark => "dark",
            AppearanceMode::Auto => "auto",
        }
    }
}

impl fmt::Display for AppearanceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppearanceMode {
    type Err = AppearanceError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| AppearanceError::InvalidMode(s.to_string()))
    }
}
