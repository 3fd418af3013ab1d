//! Similarity model gateway: the public `train` / `predict` façade.
//!
//! ```text
//! train(rows)  ──▶ DependencyProber ──▶ TrainingPipeline ──▶ GenerationStore
//!                                                           (create, retire)
//! predict(id)  ──▶ DependencyProber ──▶ PredictionInvoker ──▶ GenerationStore
//!                                                           (latest)
//! ```
//!
//! The gateway only adds logging context, the interpreter check and the
//! single-flight training guard; errors from collaborators pass through
//! unchanged.

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use super::prediction::PredictionInvoker;
use super::probe::DependencyProber;
use super::training::{TrainingPipeline, TrainingReport};
use crate::domain::id::ProductId;
use crate::error::{ModelError, Result};
use crate::port::inbound::similarity::{SimilarityModel, TrainingRows};

/// Composes the lifecycle services behind [`SimilarityModel`].
pub struct SimilarityModelGateway {
    prober: DependencyProber,
    pipeline: TrainingPipeline,
    invoker: PredictionInvoker,
    training: Mutex<()>,
}

impl SimilarityModelGateway {
    pub fn new(
        prober: DependencyProber,
        pipeline: TrainingPipeline,
        invoker: PredictionInvoker,
    ) -> Self {
        Self {
            prober,
            pipeline,
            invoker,
            training: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn prober(&self) -> &DependencyProber {
        &self.prober
    }

    /// Train and return what the run produced.
    ///
    /// A second call while a run is in flight fails fast with
    /// [`ModelError::TrainingInProgress`] instead of racing on retirement.
    pub async fn train_with_report(&self, rows: TrainingRows) -> Result<TrainingReport> {
        let Ok(_guard) = self.training.try_lock() else {
            warn!(operation = "train", "Training already in progress");
            return Err(ModelError::TrainingInProgress.into());
        };

        info!(operation = "train", "Training model with new data");
        let result = async {
            self.ensure_runtime().await?;
            self.pipeline.run(rows).await
        }
        .await;

        match &result {
            Ok(report) => info!(
                operation = "train",
                generation = %report.generation,
                rows = report.rows,
                retired = report.retired,
                "Model trained"
            ),
            Err(e) => error!(operation = "train", error = %e, "Error training model"),
        }
        result
    }

    async fn ensure_runtime(&self) -> Result<()> {
        if self.prober.is_available().await {
            return Ok(());
        }
        Err(ModelError::MissingDependency {
            dependency: self.prober.interpreter().to_string(),
            details: "interpreter is not installed or not runnable".to_string(),
        }
        .into())
    }
}

#[async_trait]
impl SimilarityModel for SimilarityModelGateway {
    async fn train(&self, rows: TrainingRows) -> Result<()> {
        self.train_with_report(rows).await.map(|_| ())
    }

    async fn predict(&self, product_id: &ProductId) -> Result<Vec<ProductId>> {
        info!(operation = "predict", product_id = %product_id, "Predicting similar products");

        let result = async {
            self.ensure_runtime().await?;
            self.invoker.predict(product_id).await
        }
        .await;

        if let Err(e) = &result {
            error!(
                operation = "predict",
                product_id = %product_id,
                error = %e,
                "Error predicting similar products"
            );
        }
        result
    }
}
