//! Composition root for the model services.
//!
//! Wires the process runner, the filesystem store and the system clock into
//! the lifecycle services described by [`ModelConfig`].

use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::fs::store::FsGenerationStore;
use crate::adapter::outbound::process::runner::TokioProcessRunner;
use crate::adapter::outbound::source::jsonl::JsonLinesSource;
use crate::application::schedule::service::TrainingScheduler;
use crate::application::similarity::config::ModelConfig;
use crate::application::similarity::gateway::SimilarityModelGateway;
use crate::application::similarity::prediction::PredictionInvoker;
use crate::application::similarity::probe::DependencyProber;
use crate::application::similarity::training::TrainingPipeline;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::settings::Config;
use crate::port::inbound::similarity::SimilarityModel;
use crate::port::outbound::clock::{Clock, SystemClock};
use crate::port::outbound::process::ProcessRunner;
use crate::port::outbound::store::GenerationStore;

/// Build the dependency prober for the configured interpreter.
pub fn build_prober(config: &ModelConfig, runner: Arc<dyn ProcessRunner>) -> DependencyProber {
    DependencyProber::new(
        runner,
        config.interpreter.clone(),
        config.probe_args.clone(),
        config.probe_timeout(),
    )
}

/// Build the generation store rooted at `model.root`.
pub fn build_store(config: &ModelConfig) -> Arc<FsGenerationStore> {
    Arc::new(FsGenerationStore::new(config.root.clone()))
}

/// Build the gateway from explicit collaborators.
pub fn build_gateway_with(
    config: &ModelConfig,
    runner: Arc<dyn ProcessRunner>,
    store: Arc<dyn GenerationStore>,
    clock: Arc<dyn Clock>,
) -> SimilarityModelGateway {
    let prober = build_prober(config, Arc::clone(&runner));
    let pipeline = TrainingPipeline::new(
        Arc::clone(&runner),
        Arc::clone(&store),
        clock,
        config.interpreter.clone(),
        config.train_script.clone(),
        config.train_timeout(),
    );
    let invoker = PredictionInvoker::new(
        runner,
        store,
        config.interpreter.clone(),
        config.predict_script.clone(),
        config.predict_timeout(),
    );
    SimilarityModelGateway::new(prober, pipeline, invoker)
}

/// Build the gateway backed by real processes and the local filesystem.
pub fn build_gateway(config: &ModelConfig) -> SimilarityModelGateway {
    info!(
        interpreter = %config.interpreter,
        root = %config.root.display(),
        "Building similarity model gateway"
    );
    build_gateway_with(
        config,
        Arc::new(TokioProcessRunner::new()),
        build_store(config),
        Arc::new(SystemClock),
    )
}

/// Build the training scheduler from `[schedule]`.
///
/// # Errors
///
/// Returns [`ConfigError::MissingField`] when no source is configured.
#[allow(clippy::result_large_err)]
pub fn build_scheduler(
    config: &Config,
    model: Arc<dyn SimilarityModel>,
) -> Result<TrainingScheduler> {
    let Some(source) = config.schedule.source.clone() else {
        return Err(ConfigError::MissingField {
            field: "schedule.source",
        }
        .into());
    };

    Ok(TrainingScheduler::new(
        Arc::new(JsonLinesSource::new(source)),
        model,
        config.schedule.interval(),
        config.schedule.train_on_start,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::testkit::clock::SteppingClock;
    use crate::testkit::process::ScriptedRunner;

    #[tokio::test]
    async fn gateway_uses_configured_interpreter_for_probe() {
        let config = ModelConfig {
            interpreter: "python3.11".to_string(),
            ..ModelConfig::default()
        };
        let runner = Arc::new(ScriptedRunner::default());
        runner.push_ok("Python 3.11.4\n");

        let tmp = tempfile::tempdir().unwrap();
        let gateway = build_gateway_with(
            &config,
            runner.clone(),
            Arc::new(FsGenerationStore::new(tmp.path())),
            Arc::new(SteppingClock::fixed(1)),
        );

        assert_eq!(gateway.prober().version().await.as_deref(), Some("Python 3.11.4"));
        let calls = runner.calls();
        assert_eq!(calls[0].program, "python3.11");
        assert_eq!(calls[0].display_args(), vec!["--version"]);
    }

    #[test]
    fn scheduler_requires_source() {
        let config = Config::default();
        let model: Arc<dyn SimilarityModel> = Arc::new(build_gateway(&config.model));

        assert!(matches!(
            build_scheduler(&config, model),
            Err(Error::Config(ConfigError::MissingField { .. }))
        ));
    }
}
