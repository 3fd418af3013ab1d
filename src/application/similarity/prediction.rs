//! Prediction invoker: latest generation → external predictor → ranked ids.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info};

use crate::domain::id::ProductId;
use crate::error::{ModelError, Result};
use crate::port::outbound::process::{ProcessRequest, ProcessRunner};
use crate::port::outbound::store::GenerationStore;

/// Runs the external predictor against the latest usable generation.
pub struct PredictionInvoker {
    runner: Arc<dyn ProcessRunner>,
    store: Arc<dyn GenerationStore>,
    interpreter: String,
    script: PathBuf,
    timeout: Option<Duration>,
}

impl PredictionInvoker {
    pub fn new(
        runner: Arc<dyn ProcessRunner>,
        store: Arc<dyn GenerationStore>,
        interpreter: impl Into<String>,
        script: impl Into<PathBuf>,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            runner,
            store,
            interpreter: interpreter.into(),
            script: script.into(),
            timeout,
        }
    }

    /// Similar products in the predictor's ranking order.
    ///
    /// The order is the predictor's contract and is never re-sorted here.
    pub async fn predict(&self, product_id: &ProductId) -> Result<Vec<ProductId>> {
        let generation = self.store.latest().await?.ok_or(ModelError::NotTrained)?;
        let artifacts = generation.artifacts();
        debug!(
            generation = %generation,
            model = %artifacts.model_file.display(),
            matrix = %artifacts.matrix_file.display(),
            "Resolved latest generation"
        );

        let request = ProcessRequest::new(&self.interpreter)
            .arg(&self.script)
            .arg(product_id.as_str())
            .arg(&artifacts.model_file)
            .arg(&artifacts.matrix_file)
            .timeout(self.timeout);

        let output = self.runner.run(&request).await?;
        if !output.succeeded() {
            error!(
                product_id = %product_id,
                exit = %output.exit,
                stderr = %output.stderr.trim(),
                "Predictor failed"
            );
            return Err(ModelError::ScriptFailure {
                exit: output.exit,
                stderr: output.stderr,
            }
            .into());
        }

        let similar = parse_prediction(&output.stdout)?;
        info!(product_id = %product_id, count = similar.len(), "Prediction complete");
        Ok(similar)
    }
}

/// Decode the predictor's stdout: a single JSON array of string ids.
///
/// Bytes that are not valid UTF-8 are rejected rather than replaced.
pub fn parse_prediction(stdout: &[u8]) -> Result<Vec<ProductId>> {
    serde_json::from_slice::<Vec<String>>(stdout)
        .map(|ids| ids.into_iter().map(ProductId::new).collect())
        .map_err(|source| {
            ModelError::InvalidOutput {
                output: String::from_utf8_lossy(stdout).into_owned(),
                source,
            }
            .into()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::testkit::domain::products;

    #[test]
    fn parse_preserves_order() {
        let ids = parse_prediction(b"[\"p3\",\"p1\",\"p2\"]\n").unwrap();
        assert_eq!(ids, products(&["p3", "p1", "p2"]));
    }

    #[test]
    fn parse_accepts_empty_array() {
        assert!(parse_prediction(b"[]").unwrap().is_empty());
    }

    #[test]
    fn parse_rejects_non_array_output() {
        for stdout in ["", "not json", "{\"ids\":[]}", "[1,2]"] {
            let err = parse_prediction(stdout.as_bytes()).unwrap_err();
            assert!(
                matches!(err, Error::Model(ModelError::InvalidOutput { .. })),
                "{stdout:?} should be rejected"
            );
        }
    }

    #[test]
    fn parse_rejects_invalid_utf8_instead_of_replacing_it() {
        let err = parse_prediction(b"[\"p\xff\"]").unwrap_err();

        match err {
            Error::Model(ModelError::InvalidOutput { output, .. }) => {
                assert_eq!(output, "[\"p\u{fffd}\"]");
            }
            other => panic!("expected invalid output, got {other}"),
        }
    }
}
