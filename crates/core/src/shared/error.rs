use std::time::Duration;

use thiserror::Error;

/// The external process could not be started or waited on.
#[derive(Error, Debug)]
pub enum CommandRunError {
    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed waiting for `{program}`: {source}")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Why a command that had to succeed did not.
#[derive(Error, Debug)]
pub enum CommandFailure {
    #[error(transparent)]
    Run(#[from] CommandRunError),
    #[error("`{program}` exited with {}{}", exit_description(.code), stderr_suffix(.stderr))]
    ExitCode {
        program: String,
        code: Option<i32>,
        stderr: String,
    },
    #[error("`{program}` timed out after {}s", seconds(.timeout))]
    TimedOut { program: String, timeout: Duration },
}

#[derive(Error, Debug)]
pub enum AppearanceError {
    #[error("failed to get appearance mode: {0}")]
    Query(#[source] CommandRunError),
    #[error("invalid mode: {0:?}; expected one of: light, dark, auto")]
    InvalidMode(String),
    #[error("failed to set appearance mode: {0}")]
    Command(#[source] CommandFailure),
}

fn exit_description(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".to_string(),
    }
}

fn seconds(timeout: &Duration) -> f64 {
    timeout.as_secs_f64()
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_exit_code_message_includes_stderr() {
        let failure = CommandFailure::ExitCode {
            program: "osascript".to_string(),
            code: Some(1),
            stderr: "execution error: Not authorized\n".to_string(),
        };
        assert_eq!(
            failure.to_string(),
            "`osascript` exited with status 1: execution error: Not authorized"
        );
    }

    #[test]
    fn test_exit_code_message_without_stderr() {
        let failure = CommandFailure::ExitCode {
            program: "defaults".to_string(),
            code: None,
            stderr: String::new(),
        };
        assert_eq!(
            failure.to_string(),
            "`defaults` exited with no status (terminated by signal)"
        );
    }

    #[test]
    fn test_timeout_message() {
        let failure = CommandFailure::TimedOut {
            program: "osascript".to_string(),
            timeout: Duration::from_secs(5),
        };
        assert_eq!(failure.to_string(), "`osascript` timed out after 5s");
    }

    #[test]
    fn test_command_error_wraps_cause() {
        let err = AppearanceError::Command(CommandFailure::TimedOut {
            program: "osascript".to_string(),
            timeout: Duration::from_millis(500),
        });
        assert_eq!(
            err.to_string(),
            "failed to set appearance mode: `osascript` timed out after 0.5s"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn test_query_error_exposes_spawn_source() {
        let err = AppearanceError::Query(CommandRunError::Spawn {
            program: "defaults".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        });
        assert!(err.to_string().starts_with("failed to get appearance mode: failed to spawn `defaults`"));
        assert!(err.source().is_some());
    }
}
