//! Process port for out-of-process model computation.
//!
//! The lifecycle services talk to the external trainer and predictor only
//! through byte streams: command-line arguments in, exit status plus captured
//! stdout/stderr out. Nothing in the application layer spawns processes
//! directly, so a fake runner can stand in for the real interpreter.

use std::ffi::{OsStr, OsString};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{Result, ScriptExit};

/// A single external process invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRequest {
    /// Program to execute (resolved through `PATH`).
    pub program: OsString,
    /// Positional arguments, in order.
    pub args: Vec<OsString>,
    /// Wall-clock limit. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl ProcessRequest {
    #[must_use]
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
            args: Vec::new(),
            timeout: None,
        }
    }

    /// Append one positional argument.
    #[must_use]
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Append several positional arguments.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Lossy UTF-8 rendering of the arguments, for logs and assertions.
    #[must_use]
    pub fn display_args(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }
}

/// Everything observable about a finished process.
///
/// Stdout is kept as raw bytes so callers decide how strictly to decode it;
/// stderr is diagnostic only and already lossily decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    pub exit: ScriptExit,
    pub stdout: Vec<u8>,
    pub stderr: String,
}

impl ProcessOutput {
    /// Lossy UTF-8 view of stdout, for logs and version strings.
    #[must_use]
    pub fn stdout_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    /// Exit code 0 and nothing at all on the error stream.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.exit.is_success() && self.stderr.is_empty()
    }
}

/// Runs external processes to completion.
///
/// # Errors
///
/// [`run`](Self::run) returns an error only when the process could not be
/// started or its streams could not be read. Non-zero exits, error-stream
/// output and timeouts are reported through [`ProcessOutput::exit`] so the
/// caller can classify them.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    async fn run(&self, request: &ProcessRequest) -> Result<ProcessOutput>;
}
