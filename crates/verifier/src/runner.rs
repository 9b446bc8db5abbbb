//! External hardware/RTL collaborator invocation.
//!
//! The runner is an opaque executable receiving the assembled image and
//! the two output paths it must produce. The only contract is its exit
//! status and those files; there is no shared memory. Every spawn either
//! collects the exit status or kills the child, so no invocation is ever
//! left half-finished.

use std::io;
use std::path::Path;
use std::process::{Child, Command, ExitStatus};
use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;

/// Default RTL-simulation runner command.
pub const DEFAULT_RTL_RUNNER: &str = "./run_test.sh";
/// Default FPGA emulation runner command.
pub const DEFAULT_FPGA_RUNNER: &str = "./run_fpga_test.sh";
/// Default bound on one runner invocation.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Failure modes at the collaborator process boundary. All of them fail
/// the affected case; none of them crash the verifier.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// The runner executable could not be started.
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        /// The program that failed to start.
        program: String,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// The runner exited with a non-success status.
    #[error("runner exited with {status}")]
    Failed {
        /// The runner's exit status.
        status: ExitStatus,
    },
    /// No completion signal arrived within the bounded window.
    #[error("runner produced no result within {timeout_secs} s")]
    TimedOut {
        /// The exceeded window, in seconds.
        timeout_secs: u64,
    },
    /// Waiting on the child process itself failed.
    #[error("failed to wait on runner: {0}")]
    Wait(io::Error),
}

/// An external runner command with its invocation policy.
#[derive(Debug, Clone)]
pub struct ExternalRunner {
    /// Program to execute.
    pub program: String,
    /// Fixed leading arguments; the three paths are appended after them.
    pub args: Vec<String>,
    /// Bound on one invocation.
    pub timeout: Duration,
}

impl ExternalRunner {
    /// Builds a runner from a whitespace-separated command line.
    #[must_use]
    pub fn new(command_line: &str, timeout: Duration) -> Self {
        let mut parts = command_line.split_whitespace().map(ToString::to_string);
        let program = parts.next().unwrap_or_default();
        Self {
            program,
            args: parts.collect(),
            timeout,
        }
    }

    /// Invokes the runner as `<program> <args>.. <image> <mem_out>
    /// <trace_out>` and waits for it within the timeout.
    ///
    /// # Errors
    ///
    /// Returns a [`RunnerError`] on spawn failure, non-success exit, wait
    /// failure, or timeout (the child is killed and reaped on timeout).
    pub fn run(
        &self,
        image: &Path,
        mem_out: &Path,
        trace_out: &Path,
    ) -> Result<(), RunnerError> {
        let child = Command::new(&self.program)
            .args(&self.args)
            .arg(image)
            .arg(mem_out)
            .arg(trace_out)
            .spawn()
            .map_err(|source| RunnerError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        wait_with_deadline(child, self.timeout)
    }
}

fn wait_with_deadline(mut child: Child, timeout: Duration) -> Result<(), RunnerError> {
    let deadline = Instant::now() + timeout;
    loop {
        match child.try_wait() {
            Ok(Some(status)) => {
                return if status.success() {
                    Ok(())
                } else {
                    Err(RunnerError::Failed { status })
                };
            }
            Ok(None) => {
                if Instant::now() >= deadline {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(RunnerError::TimedOut {
                        timeout_secs: timeout.as_secs(),
                    });
                }
                thread::sleep(POLL_INTERVAL);
            }
            Err(e) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(RunnerError::Wait(e));
            }
        }
    }
}
