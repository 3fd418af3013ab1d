//! Interpreter availability probe.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::port::outbound::process::{ProcessRequest, ProcessRunner};

/// Checks that the external interpreter can be invoked at all.
///
/// Any failure, including a spawn error, becomes `false`. The probe never
/// propagates an error so a missing interpreter cannot crash the host.
pub struct DependencyProber {
    runner: Arc<dyn ProcessRunner>,
    interpreter: String,
    args: Vec<String>,
    timeout: Option<Duration>,
}

impl DependencyProber {
    pub fn new(
        runner: Arc<dyn ProcessRunner>,
        interpreter: impl Into<String>,
        args: Vec<String>,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            runner,
            interpreter: interpreter.into(),
            args,
            timeout,
        }
    }

    #[must_use]
    pub fn interpreter(&self) -> &str {
        &self.interpreter
    }

    /// Run the probe command and report whether it finished cleanly.
    pub async fn is_available(&self) -> bool {
        self.version().await.is_some()
    }

    /// Run the probe command and return its trimmed standard output.
    pub async fn version(&self) -> Option<String> {
        let request = ProcessRequest::new(&self.interpreter)
            .args(&self.args)
            .timeout(self.timeout);

        match self.runner.run(&request).await {
            Ok(output) if output.succeeded() => {
                let version = output.stdout_lossy().trim().to_string();
                debug!(interpreter = %self.interpreter, version = %version, "Interpreter available");
                Some(version)
            }
            Ok(output) => {
                warn!(
                    interpreter = %self.interpreter,
                    exit = %output.exit,
                    stderr = %output.stderr.trim(),
                    "Interpreter probe failed"
                );
                None
            }
            Err(e) => {
                warn!(interpreter = %self.interpreter, error = %e, "Interpreter could not be started");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScriptExit;
    use crate::testkit::process::ScriptedRunner;

    fn prober(runner: &Arc<ScriptedRunner>) -> DependencyProber {
        DependencyProber::new(
            runner.clone(),
            "python3",
            vec!["--version".into()],
            Some(Duration::from_secs(1)),
        )
    }

    #[tokio::test]
    async fn available_when_version_printed() {
        let runner = Arc::new(ScriptedRunner::new());
        runner.push_ok("Python 3.12.1\n");

        let prober = prober(&runner);
        assert_eq!(prober.version().await.as_deref(), Some("Python 3.12.1"));

        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].display_args(), vec!["--version"]);
        assert_eq!(calls[0].timeout, Some(Duration::from_secs(1)));
    }

    #[tokio::test]
    async fn unavailable_on_nonzero_exit() {
        let runner = Arc::new(ScriptedRunner::new());
        runner.push_exit(ScriptExit::Code(127), "", "");

        assert!(!prober(&runner).is_available().await);
    }

    #[tokio::test]
    async fn unavailable_on_error_stream_output() {
        let runner = Arc::new(ScriptedRunner::new());
        runner.push_exit(ScriptExit::Code(0), "Python 2.7", "deprecated");

        assert!(!prober(&runner).is_available().await);
    }

    #[tokio::test]
    async fn unavailable_when_spawn_fails() {
        let runner = Arc::new(ScriptedRunner::new());
        runner.push_spawn_error("No such file or directory");

        assert!(!prober(&runner).is_available().await);
    }
}
