use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::appearance::domain::command_runner::{CommandOutput, CommandRunner};
use crate::shared::error::CommandRunError;

/// One recorded call to [`ScriptedCommandRunner::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub timeout: Duration,
}

impl Invocation {
    /// Program and arguments joined by spaces.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Planned outcome for the next invocation.
#[derive(Debug)]
pub enum Scripted {
    Output(CommandOutput),
    SpawnFailure,
}

/// In-memory runner that replays queued outcomes and records every call.
///
/// Once the queue is empty every further call succeeds with empty stdout.
/// Clones share the same queue and call log, so a test can keep a handle
/// after boxing the runner into a use case.
#[derive(Debug, Clone, Default)]
pub struct ScriptedCommandRunner {
    outcomes: Arc<Mutex<VecDeque<Scripted>>>,
    calls: Arc<Mutex<Vec<Invocation>>>,
}

impl ScriptedCommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then_output(self, output: CommandOutput) -> Self {
        self.push(Scripted::Output(output));
        self
    }

    pub fn then_exit(self, exit_code: i32, stdout: &str) -> Self {
        self.then_output(CommandOutput::exited(exit_code, stdout))
    }

    pub fn then_timeout(self) -> Self {
        self.then_output(CommandOutput::timed_out())
    }

    pub fn then_spawn_failure(self) -> Self {
        self.push(Scripted::SpawnFailure);
        self
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn push(&self, outcome: Scripted) {
        if let Ok(mut queue) = self.outcomes.lock() {
            queue.push_back(outcome);
        }
    }
}

impl CommandRunner for ScriptedCommandRunner {
    fn run(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<CommandOutput, CommandRunError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(Invocation {
                program: program.to_string(),
                args: args.iter().map(|a| a.to_string()).collect(),
                timeout,
            });
        }

        let next = self
            .outcomes
            .lock()
            .ok()
            .and_then(|mut queue| queue.pop_front());

        match next {
            Some(Scripted::Output(output)) => Ok(output),
            Some(Scripted::SpawnFailure) => Err(CommandRunError::Spawn {
                program: program.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "scripted spawn failure"),
            }),
            None => Ok(CommandOutput::exited(0, "")),
        }
    }
}
