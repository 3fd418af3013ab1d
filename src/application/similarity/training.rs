//! Training pipeline: rows → training file → external trainer → new generation.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::fs::File;
use tokio::io::BufWriter;
use tracing::{error, info, warn};

use super::dataset::write_training_file;
use crate::domain::generation::{GenerationId, GenerationStatus, ModelGeneration};
use crate::error::{Error, ModelError, Result};
use crate::port::inbound::similarity::TrainingRows;
use crate::port::outbound::clock::Clock;
use crate::port::outbound::process::{ProcessRequest, ProcessRunner};
use crate::port::outbound::store::GenerationStore;

/// Outcome of a successful training run.
#[derive(Debug, Clone)]
pub struct TrainingReport {
    pub generation: ModelGeneration,
    pub rows: u64,
    pub retired: usize,
}

/// Materializes rows, drives the external trainer and commits the result.
///
/// Steps are strictly sequential. The new generation only becomes a
/// candidate for `latest()` once the trainer has exited cleanly and left
/// both artifacts behind; every other generation is retired afterwards.
pub struct TrainingPipeline {
    runner: Arc<dyn ProcessRunner>,
    store: Arc<dyn GenerationStore>,
    clock: Arc<dyn Clock>,
    interpreter: String,
    script: PathBuf,
    timeout: Option<Duration>,
}

impl TrainingPipeline {
    pub fn new(
        runner: Arc<dyn ProcessRunner>,
        store: Arc<dyn GenerationStore>,
        clock: Arc<dyn Clock>,
        interpreter: impl Into<String>,
        script: impl Into<PathBuf>,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            runner,
            store,
            clock,
            interpreter: interpreter.into(),
            script: script.into(),
            timeout,
        }
    }

    /// Run one training pass.
    ///
    /// On failure after allocation the new directory is left in place with a
    /// failure record and the previous generation stays current.
    pub async fn run(&self, rows: TrainingRows) -> Result<TrainingReport> {
        let id = GenerationId::from_epoch_ms(self.clock.now_epoch_ms());
        let generation = self.store.create(id).await?;
        info!(generation = %generation, "Allocated model generation");

        let rows = match self.materialize(&generation, rows).await {
            Ok(count) => count,
            Err(e) => return Err(self.abandon(&generation, e).await),
        };
        info!(generation = %generation, rows, "Training data written");

        if let Err(e) = self.invoke_trainer(&generation).await {
            return Err(self.abandon(&generation, e).await);
        }
        info!(generation = %generation, "Trainer finished");

        if let Err(e) = self.verify_artifacts(&generation).await {
            return Err(self.abandon(&generation, e).await);
        }

        let retired = self.store.retire_all_except(&generation).await?;
        info!(generation = %generation, retired, "Previous generations retired");

        Ok(TrainingReport {
            generation,
            rows,
            retired,
        })
    }

    async fn materialize(&self, generation: &ModelGeneration, rows: TrainingRows) -> Result<u64> {
        let path = generation.training_file();
        let file = File::create(&path).await?;
        let mut writer = BufWriter::new(file);
        write_training_file(&mut writer, rows).await
    }

    async fn invoke_trainer(&self, generation: &ModelGeneration) -> Result<()> {
        let request = ProcessRequest::new(&self.interpreter)
            .arg(&self.script)
            .arg(generation.training_file())
            .arg(generation.path())
            .timeout(self.timeout);

        info!(
            script = %self.script.display(),
            args = ?request.display_args(),
            "Running trainer"
        );

        let output = self.runner.run(&request).await?;
        if !output.succeeded() {
            error!(exit = %output.exit, stderr = %output.stderr.trim(), "Trainer failed");
            return Err(ModelError::ScriptFailure {
                exit: output.exit,
                stderr: output.stderr,
            }
            .into());
        }
        Ok(())
    }

    async fn verify_artifacts(&self, generation: &ModelGeneration) -> Result<()> {
        match self.store.status(generation).await? {
            GenerationStatus::Usable => Ok(()),
            status => {
                error!(generation = %generation, %status, "Trainer left no usable model");
                Err(ModelError::MissingArtifacts {
                    path: generation.path().to_path_buf(),
                }
                .into())
            }
        }
    }

    /// Record the failure next to the partial artifacts and hand the error back.
    async fn abandon(&self, generation: &ModelGeneration, cause: Error) -> Error {
        if let Err(e) = self.store.mark_failed(generation, &cause.to_string()).await {
            warn!(generation = %generation, error = %e, "Could not record training failure");
        }
        cause
    }
}
