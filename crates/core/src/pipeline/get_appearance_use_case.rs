use std::time::Duration;

use crate::appearance::domain::appearance_mode::AppearanceMode;
use crate::appearance::domain::command_runner::CommandRunner;
use crate::shared::constants::{
    AUTO_BLUE_REDUCTION_FIELD, COMMAND_TIMEOUT, DARK_STYLE_MARKER, DEFAULTS_PROGRAM,
    INTERFACE_STYLE_KEY, NIGHT_SHIFT_DOMAIN, NIGHT_SHIFT_STATUS_KEY,
};
use crate::shared::error::AppearanceError;

/// Reads the current appearance: interface style first, then Night Shift.
pub struct GetAppearanceUseCase {
    runner: Box<dyn CommandRunner>,
    timeout: Duration,
    detect_auto: bool,
}

impl GetAppearanceUseCase {
    pub fn new(runner: Box<dyn CommandRunner>) -> Self {
        Self {
            runner,
            timeout: COMMAND_TIMEOUT,
            detect_auto: true,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// When disabled, only the interface style is consulted and `Auto` is
    /// never reported.
    pub fn with_auto_detection(mut self, enabled: bool) -> Self {
        self.detect_auto = enabled;
        self
    }

    /// A failed or expired style query counts as "not dark". Only a process
    /// that cannot be started is an error, and only for the style query: the
    /// Night Shift check falls back to `Light` on any failure.
    pub fn execute(&self) -> Result<AppearanceMode, AppearanceError> {
        let style = self
            .runner
            .run(
                DEFAULTS_PROGRAM,
                &["read", "-g", INTERFACE_STYLE_KEY],
                self.timeout,
            )
            .map_err(AppearanceError::Query)?;

        if style.timed_out {
            log::warn!("Interface style query timed out; assuming not dark");
        }
        if style.success() && style.stdout.contains(DARK_STYLE_MARKER) {
            return Ok(AppearanceMode::Dark);
        }

        if self.detect_auto && self.auto_reduction_enabled() {
            return Ok(AppearanceMode::Auto);
        }

        Ok(AppearanceMode::Light)
    }

    fn auto_reduction_enabled(&self) -> bool {
        let result = self.runner.run(
            DEFAULTS_PROGRAM,
            &["read", NIGHT_SHIFT_DOMAIN, NIGHT_SHIFT_STATUS_KEY],
            self.timeout,
        );
        match result {
            Ok(output) if output.success() => indicates_auto_reduction(&output.stdout),
            Ok(output) => {
                log::debug!(
                    "Night Shift query unavailable (exit {:?}, timed out: {}); assuming light",
                    output.exit_code,
                    output.timed_out
                );
                false
            }
            Err(e) => {
                log::debug!("Night Shift query failed: {e}; assuming light");
                false
            }
        }
    }
}

/// Matches `AutoBlueReductionEnabled = 1;` in the plist dump, ignoring
/// whitespace.
fn indicates_auto_reduction(dump: &str) -> bool {
    let compact: String = dump.chars().filter(|c| !c.is_whitespace()).collect();
    let needle = format!("{AUTO_BLUE_REDUCTION_FIELD}=1;");
    compact.contains(&needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appearance::infrastructure::scripted_command_runner::ScriptedCommandRunner;
    use rstest::rstest;

    const NIGHT_SHIFT_AUTO: &str = "{\n    AutoBlueReductionEnabled = 1;\n    BlueLightReductionSchedule = {\n        DayStartHour = 7;\n    };\n}\n";
    const NIGHT_SHIFT_OFF: &str = "{\n    AutoBlueReductionEnabled = 0;\n    BlueReductionEnabled = 0;\n}\n";

    fn use_case(runner: &ScriptedCommandRunner) -> GetAppearanceUseCase {
        GetAppearanceUseCase::new(Box::new(runner.clone()))
    }

    #[rstest]
    #[case::exact("Dark")]
    #[case::newline("Dark\n")]
    #[case::surrounded("style: Dark mode")]
    fn test_dark_marker_returns_dark(#[case] stdout: &str) {
        let runner = ScriptedCommandRunner::new().then_exit(0, stdout);
        assert_eq!(use_case(&runner).execute().unwrap(), AppearanceMode::Dark);
        assert_eq!(runner.calls().len(), 1);
    }

    #[test]
    fn test_queries_global_interface_style() {
        let runner = ScriptedCommandRunner::new().then_exit(0, "Dark");
        use_case(&runner).execute().unwrap();

        let calls = runner.calls();
        assert_eq!(calls[0].command_line(), "defaults read -g AppleInterfaceStyle");
        assert_eq!(calls[0].timeout, COMMAND_TIMEOUT);
    }

    #[rstest]
    #[case::missing_key(1, "")]
    #[case::empty_success(0, "")]
    #[case::other_value(0, "Light")]
    #[case::lowercase(0, "dark")]
    #[case::dark_but_failed(1, "Dark")]
    fn test_no_dark_marker_and_no_auto_returns_light(#[case] code: i32, #[case] stdout: &str) {
        let runner = ScriptedCommandRunner::new()
            .then_exit(code, stdout)
            .then_exit(0, NIGHT_SHIFT_OFF);
        assert_eq!(use_case(&runner).execute().unwrap(), AppearanceMode::Light);
    }

    #[test]
    fn test_auto_reduction_returns_auto() {
        let runner = ScriptedCommandRunner::new()
            .then_exit(1, "")
            .then_exit(0, NIGHT_SHIFT_AUTO);
        assert_eq!(use_case(&runner).execute().unwrap(), AppearanceMode::Auto);

        let calls = runner.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(
            calls[1].command_line(),
            "defaults read com.apple.CoreBrightness CBBlueReductionStatus"
        );
    }

    #[test]
    fn test_dark_wins_over_auto() {
        let runner = ScriptedCommandRunner::new()
            .then_exit(0, "Dark")
            .then_exit(0, NIGHT_SHIFT_AUTO);
        assert_eq!(use_case(&runner).execute().unwrap(), AppearanceMode::Dark);
    }

    #[test]
    fn test_style_timeout_is_not_an_error() {
        let runner = ScriptedCommandRunner::new()
            .then_timeout()
            .then_exit(0, NIGHT_SHIFT_OFF);
        assert_eq!(use_case(&runner).execute().unwrap(), AppearanceMode::Light);
    }

    #[test]
    fn test_style_spawn_failure_is_query_error() {
        let runner = ScriptedCommandRunner::new().then_spawn_failure();
        let err = use_case(&runner).execute().unwrap_err();
        assert!(matches!(err, AppearanceError::Query(_)));
        assert_eq!(runner.calls().len(), 1);
    }

    #[rstest]
    #[case::spawn_failure(ScriptedCommandRunner::new().then_exit(1, "").then_spawn_failure())]
    #[case::timeout(ScriptedCommandRunner::new().then_exit(1, "").then_timeout())]
    #[case::missing_domain(ScriptedCommandRunner::new().then_exit(1, "").then_exit(1, ""))]
    #[case::failed_with_auto_text(ScriptedCommandRunner::new().then_exit(1, "").then_exit(1, NIGHT_SHIFT_AUTO))]
    fn test_auto_check_failure_falls_back_to_light(#[case] runner: ScriptedCommandRunner) {
        assert_eq!(use_case(&runner).execute().unwrap(), AppearanceMode::Light);
    }

    #[test]
    fn test_auto_detection_disabled_skips_night_shift() {
        let runner = ScriptedCommandRunner::new()
            .then_exit(1, "")
            .then_exit(0, NIGHT_SHIFT_AUTO);
        let mode = use_case(&runner)
            .with_auto_detection(false)
            .execute()
            .unwrap();
        assert_eq!(mode, AppearanceMode::Light);
        assert_eq!(runner.calls().len(), 1);
    }

    #[test]
    fn test_custom_timeout_applies_to_both_queries() {
        let runner = ScriptedCommandRunner::new().then_exit(1, "");
        use_case(&runner)
            .with_timeout(Duration::from_secs(2))
            .execute()
            .unwrap();
        assert!(runner
            .calls()
            .iter()
            .all(|call| call.timeout == Duration::from_secs(2)));
    }

    #[rstest]
    #[case::plist(NIGHT_SHIFT_AUTO, true)]
    #[case::no_spaces("{AutoBlueReductionEnabled=1;}", true)]
    #[case::disabled(NIGHT_SHIFT_OFF, false)]
    #[case::other_field("{ BlueReductionEnabled = 1; }", false)]
    #[case::empty("", false)]
    fn test_indicates_auto_reduction(#[case] dump: &str, #[case] expected: bool) {
        assert_eq!(indicates_auto_reduction(dump), expected);
    }
}
