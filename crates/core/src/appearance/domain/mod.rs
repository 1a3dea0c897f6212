pub mod appearance_mode;
pub mod command_runner;
