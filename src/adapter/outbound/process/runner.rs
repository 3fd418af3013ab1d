//! Tokio-backed process runner.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::error::{Result, ScriptExit};
use crate::port::outbound::process::{ProcessOutput, ProcessRequest, ProcessRunner};

/// Spawns real child processes and collects their output in full.
///
/// Stdin is closed. When the request's timeout expires the child is killed
/// and the run is reported as [`ScriptExit::TimedOut`].
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioProcessRunner;

impl TokioProcessRunner {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProcessRunner for TokioProcessRunner {
    async fn run(&self, request: &ProcessRequest) -> Result<ProcessOutput> {
        debug!(
            program = %request.program.to_string_lossy(),
            args = ?request.display_args(),
            "Spawning process"
        );

        let child = Command::new(&request.program)
            .args(&request.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        let waiting = child.wait_with_output();
        let output = match request.timeout {
            Some(limit) => match tokio::time::timeout(limit, waiting).await {
                Ok(output) => output?,
                Err(_) => {
                    // Dropping the wait future drops the child, which kills it.
                    warn!(
                        program = %request.program.to_string_lossy(),
                        timeout_ms = limit.as_millis() as u64,
                        "Process timed out and was killed"
                    );
                    return Ok(ProcessOutput {
                        exit: ScriptExit::TimedOut { after: limit },
                        stdout: Vec::new(),
                        stderr: format!("process did not finish within {limit:?}"),
                    });
                }
            },
            None => waiting.await?,
        };

        let exit = match output.status.code() {
            Some(code) => ScriptExit::Code(code),
            None => ScriptExit::Signal,
        };
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        debug!(%exit, stdout_bytes = output.stdout.len(), stderr_bytes = stderr.len(), "Process exited");
        Ok(ProcessOutput {
            exit,
            stdout: output.stdout,
            stderr,
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::time::Duration;

    fn sh(script: &str) -> ProcessRequest {
        ProcessRequest::new("sh").arg("-c").arg(script)
    }

    #[tokio::test]
    async fn captures_stdout_and_exit_code() {
        let output = TokioProcessRunner
            .run(&sh("printf '[\"a\"]'"))
            .await
            .unwrap();

        assert_eq!(output.exit, ScriptExit::Code(0));
        assert_eq!(output.stdout, b"[\"a\"]");
        assert!(output.stderr.is_empty());
        assert!(output.succeeded());
    }

    #[tokio::test]
    async fn captures_stderr_and_nonzero_exit() {
        let output = TokioProcessRunner
            .run(&sh("echo oops >&2; exit 3"))
            .await
            .unwrap();

        assert_eq!(output.exit, ScriptExit::Code(3));
        assert_eq!(output.stderr, "oops\n");
        assert!(!output.succeeded());
    }

    #[tokio::test]
    async fn keeps_stdout_bytes_undecoded() {
        let output = TokioProcessRunner
            .run(&sh("printf '[\"p\\377\"]'"))
            .await
            .unwrap();

        assert_eq!(output.stdout, b"[\"p\xff\"]");
    }

    #[tokio::test]
    async fn kills_process_on_timeout() {
        let request = sh("sleep 5").timeout(Some(Duration::from_millis(100)));
        let output = TokioProcessRunner.run(&request).await.unwrap();

        assert_eq!(
            output.exit,
            ScriptExit::TimedOut {
                after: Duration::from_millis(100)
            }
        );
        assert_eq!(output.stderr, "process did not finish within 100ms");
        assert!(!output.succeeded());
    }

    #[tokio::test]
    async fn missing_program_is_an_io_error() {
        let request = ProcessRequest::new("simlife-definitely-not-installed");
        let err = TokioProcessRunner.run(&request).await.unwrap_err();

        assert!(matches!(err, Error::Io(_)));
    }
}
