use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::appearance::domain::command_runner::{describe, CommandOutput, CommandRunner};
use crate::shared::error::CommandRunError;

/// How often a running child is polled for exit.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Runs commands as real child processes with a wall-clock deadline.
///
/// stdout and stderr are drained on helper threads so a chatty child can
/// never block on a full pipe while we poll it. When the deadline passes
/// the child is killed and reaped, and the output is marked `timed_out`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessCommandRunner;

impl ProcessCommandRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ProcessCommandRunner {
    fn run(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<CommandOutput, CommandRunError> {
        log::debug!("Running: {}", describe(program, args));

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| CommandRunError::Spawn {
                program: program.to_string(),
                source,
            })?;

        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let exit_code = match wait_with_deadline(&mut child, timeout) {
            Ok(Some(code)) => code,
            Ok(None) => {
                log::debug!("`{program}` exceeded {timeout:?}, killing");
                let _ = child.kill();
                let _ = child.wait();
                // Grandchildren may still hold the pipes open; the drain
                // threads are detached rather than joined.
                drop(stdout);
                drop(stderr);
                return Ok(CommandOutput::timed_out());
            }
            Err(source) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(CommandRunError::Wait {
                    program: program.to_string(),
                    source,
                });
            }
        };

        let output = CommandOutput {
            exit_code,
            stdout: collect(stdout),
            stderr: collect(stderr),
            timed_out: false,
        };
        log::debug!("`{program}` exited with {:?}", output.exit_code);
        Ok(output)
    }
}

/// Polls the child until it exits or `timeout` elapses.
///
/// Returns `Ok(Some(code))` on exit (`code` is `None` for signal deaths)
/// and `Ok(None)` on timeout. A timeout too large to represent as an
/// `Instant` means no deadline.
fn wait_with_deadline(
    child: &mut Child,
    timeout: Duration,
) -> std::io::Result<Option<Option<i32>>> {
    let deadline = Instant::now().checked_add(timeout);
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status.code()));
        }
        let pause = match deadline {
            Some(deadline) => {
                let now = Instant::now();
                if now >= deadline {
                    return Ok(None);
                }
                POLL_INTERVAL.min(deadline - now)
            }
            None => POLL_INTERVAL,
        };
        thread::sleep(pause);
    }
}

fn drain<R>(pipe: Option<R>) -> Option<JoinHandle<String>>
where
    R: Read + Send + 'static,
{
    pipe.map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = pipe.read_to_end(&mut buf);
            String::from_utf8_lossy(&buf).into_owned()
        })
    })
}

fn collect(handle: Option<JoinHandle<String>>) -> String {
    handle
        .and_then(|handle| handle.join().ok())
        .unwrap_or_default()
}
