use std::time::Duration;

use crate::appearance::domain::appearance_mode::AppearanceMode;
use crate::appearance::domain::command_runner::CommandRunner;
use crate::shared::constants::{
    AUTO_BLUE_REDUCTION_FIELD, AUTO_MODE_NOTICE, COMMAND_TIMEOUT, DARK_MODE_OFF_SCRIPT,
    DARK_MODE_ON_SCRIPT, DEFAULTS_PROGRAM, NIGHT_SHIFT_DOMAIN, NIGHT_SHIFT_STATUS_KEY,
    OSASCRIPT_PROGRAM,
};
use crate::shared::error::{AppearanceError, CommandFailure};

/// Switches the system appearance with exactly one external command.
pub struct SetAppearanceUseCase {
    runner: Box<dyn CommandRunner>,
    timeout: Duration,
}

impl SetAppearanceUseCase {
    pub fn new(runner: Box<dyn CommandRunner>) -> Self {
        Self {
            runner,
            timeout: COMMAND_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn execute(&self, mode: AppearanceMode) -> Result<(), AppearanceError> {
        match mode {
            AppearanceMode::Dark => {
                self.run_checked(OSASCRIPT_PROGRAM, &["-e", DARK_MODE_ON_SCRIPT])
            }
            AppearanceMode::Light => {
                self.run_checked(OSASCRIPT_PROGRAM, &["-e", DARK_MODE_OFF_SCRIPT])
            }
            AppearanceMode::Auto => {
                self.run_checked(
                    DEFAULTS_PROGRAM,
                    &[
                        "write",
                        NIGHT_SHIFT_DOMAIN,
                        NIGHT_SHIFT_STATUS_KEY,
                        "-dict-add",
                        AUTO_BLUE_REDUCTION_FIELD,
                        "-bool",
                        "true",
                    ],
                )?;
                log::info!("{AUTO_MODE_NOTICE}");
                Ok(())
            }
        }?;
        log::info!("Appearance mode set to {mode}");
        Ok(())
    }

    /// Parses `name` first; an unknown name fails before anything is run.
    pub fn execute_named(&self, name: &str) -> Result<AppearanceMode, AppearanceError> {
        let mode: AppearanceMode = name.parse()?;
        self.execute(mode)?;
        Ok(mode)
    }

    fn run_checked(&self, program: &str, args: &[&str]) -> Result<(), AppearanceError> {
        let output = self
            .runner
            .run(program, args, self.timeout)
            .map_err(|e| AppearanceError::Command(CommandFailure::Run(e)))?;

        if output.timed_out {
            return Err(AppearanceError::Command(CommandFailure::TimedOut {
                program: program.to_string(),
                timeout: self.timeout,
            }));
        }
        if !output.success() {
            return Err(AppearanceError::Command(CommandFailure::ExitCode {
                program: program.to_string(),
                code: output.exit_code,
                stderr: output.stderr,
            }));
        }
        Ok(())
    }
}
