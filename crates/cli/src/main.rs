mod settings;

use std::io::{self, Write};
use std::process;
use std::time::Duration;

use clap::{Parser, Subcommand};

use mactheme_core::appearance::domain::appearance_mode::AppearanceMode;
use mactheme_core::appearance::domain::command_runner::CommandRunner;
use mactheme_core::appearance::infrastructure::process_command_runner::ProcessCommandRunner;
use mactheme_core::pipeline::get_appearance_use_case::GetAppearanceUseCase;
use mactheme_core::pipeline::set_appearance_use_case::SetAppearanceUseCase;
use mactheme_core::shared::constants::AUTO_MODE_NOTICE;

use crate::settings::Settings;

/// Manage macOS appearance modes from the command line.
#[derive(Parser)]
#[command(name = "theme-toggle", version)]
struct Cli {
    /// Seconds to wait for each system command (default from settings, else 5).
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Never report "auto"; skip the Night Shift check.
    #[arg(long, global = true)]
    no_auto: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Display the current appearance mode.
    Current,
    /// Set the appearance mode (light, dark or auto).
    Set {
        /// Mode name, case-insensitive.
        mode: String,
    },
    /// Switch to light mode.
    Light,
    /// Switch to dark mode.
    Dark,
    /// Enable Night Shift auto mode.
    Auto,
}

/// Longest accepted per-command timeout (one hour).
const MAX_TIMEOUT_SECS: u64 = 3600;

/// Effective options after merging flags over the settings file.
#[derive(Debug, PartialEq, Eq)]
struct Options {
    timeout: Duration,
    detect_auto: bool,
}

impl Options {
    fn resolve(cli: &Cli, settings: &Settings) -> Result<Self, Box<dyn std::error::Error>> {
        let secs = cli.timeout.unwrap_or(settings.timeout_secs);
        if secs == 0 {
            return Err("Timeout must be at least 1 second".into());
        }
        if secs > MAX_TIMEOUT_SECS {
            return Err(format!(
                "Timeout must be at most {MAX_TIMEOUT_SECS} seconds, got {secs}"
            )
            .into());
        }
        Ok(Self {
            timeout: Duration::from_secs(secs),
            detect_auto: settings.detect_auto && !cli.no_auto,
        })
    }
}

fn main() {
    env_logger::init();

    let result = run();
    let code = finish(result, &mut io::stderr());
    process::exit(code);
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let settings = Settings::load();
    let options = Options::resolve(&cli, &settings)?;
    log::debug!("Options: {options:?}");

    let mut stdout = io::stdout().lock();
    execute(&cli.command, &options, ProcessCommandRunner::new(), &mut stdout)
}

/// Prints the error and maps the outcome to a process exit code.
fn finish(result: Result<(), Box<dyn std::error::Error>>, err: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            let _ = writeln!(err, "Error: {e}");
            1
        }
    }
}

fn execute<R>(
    command: &Command,
    options: &Options,
    runner: R,
    out: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>>
where
    R: CommandRunner + 'static,
{
    match command {
        Command::Current => {
            let mode = GetAppearanceUseCase::new(Box::new(runner))
                .with_timeout(options.timeout)
                .with_auto_detection(options.detect_auto)
                .execute()?;
            writeln!(out, "Current mode: {mode}")?;
        }
        Command::Set { mode } => {
            let mode = setter(runner, options).execute_named(mode)?;
            writeln!(out, "Appearance mode set to: {mode}")?;
            print_notice(mode, out)?;
        }
        Command::Light => switch(AppearanceMode::Light, runner, options, out)?,
        Command::Dark => switch(AppearanceMode::Dark, runner, options, out)?,
        Command::Auto => switch(AppearanceMode::Auto, runner, options, out)?,
    }
    Ok(())
}

fn setter<R>(runner: R, options: &Options) -> SetAppearanceUseCase
where
    R: CommandRunner + 'static,
{
    SetAppearanceUseCase::new(Box::new(runner)).with_timeout(options.timeout)
}

fn switch<R>(
    mode: AppearanceMode,
    runner: R,
    options: &Options,
    out: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>>
where
    R: CommandRunner + 'static,
{
    setter(runner, options).execute(mode)?;
    writeln!(out, "Switched to {mode} mode")?;
    print_notice(mode, out)?;
    Ok(())
}

fn print_notice(mode: AppearanceMode, out: &mut dyn Write) -> io::Result<()> {
    if mode == AppearanceMode::Auto {
        writeln!(out, "{AUTO_MODE_NOTICE}")?;
    }
    Ok(())
}
