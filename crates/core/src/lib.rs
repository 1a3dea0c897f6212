//! Read and set the macOS appearance mode.
//!
//! The state itself lives in the system preference store; everything here
//! goes through `defaults` and `osascript` via a [`CommandRunner`].
//!
//! [`CommandRunner`]: appearance::domain::command_runner::CommandRunner

pub mod appearance;
pub mod pipeline;
pub mod shared;

pub use appearance::domain::appearance_mode::AppearanceMode;
pub use shared::error::AppearanceError;

use appearance::infrastructure::process_command_runner::ProcessCommandRunner;
use pipeline::get_appearance_use_case::GetAppearanceUseCase;
use pipeline::set_appearance_use_case::SetAppearanceUseCase;

/// Current system appearance, using real processes and default options.
pub fn get_appearance() -> Result<AppearanceMode, AppearanceError> {
    GetAppearanceUseCase::new(Box::new(ProcessCommandRunner::new())).execute()
}

/// Switch the system appearance, using real processes and default options.
pub fn set_appearance(mode: AppearanceMode) -> Result<(), AppearanceError> {
    SetAppearanceUseCase::new(Box::new(ProcessCommandRunner::new())).execute(mode)
}
