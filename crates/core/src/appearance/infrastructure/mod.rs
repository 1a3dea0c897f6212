pub mod process_command_runner;
#[cfg(any(test, feature = "test-support"))]
pub mod scripted_command_runner;
