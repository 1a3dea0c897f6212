use std::time::Duration;

/// Upper bound on each external invocation.
pub const COMMAND_TIMEOUT: Duration = Duration::from_secs(5);

pub const DEFAULTS_PROGRAM: &str = "defaults";
pub const OSASCRIPT_PROGRAM: &str = "osascript";

/// `defaults read -g AppleInterfaceStyle` prints "Dark" in dark mode and
/// fails with "does not exist" otherwise.
pub const INTERFACE_STYLE_KEY: &str = "AppleInterfaceStyle";
pub const DARK_STYLE_MARKER: &str = "Dark";

/// Night Shift state lives in a dictionary under this domain and key.
pub const NIGHT_SHIFT_DOMAIN: &str = "com.apple.CoreBrightness";
pub const NIGHT_SHIFT_STATUS_KEY: &str = "CBBlueReductionStatus";
pub const AUTO_BLUE_REDUCTION_FIELD: &str = "AutoBlueReductionEnabled";

pub const DARK_MODE_ON_SCRIPT: &str =
    "tell application \"System Events\" to tell appearance preferences to set dark mode to true";
pub const DARK_MODE_OFF_SCRIPT: &str =
    "tell application \"System Events\" to tell appearance preferences to set dark mode to false";

pub const AUTO_MODE_NOTICE: &str = "Night Shift auto mode enabled. Configure a schedule in \
    System Settings > Displays > Night Shift for it to take effect.";
