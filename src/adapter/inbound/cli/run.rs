//! Handler for the `run` command.

use std::sync::Arc;

use serde_json::json;
use tokio::signal;
use tracing::info;

use crate::adapter::inbound::cli::output;
use crate::error::{ConfigError, Result};
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;
use crate::port::inbound::similarity::SimilarityModel;

/// Execute the run command.
///
/// Starts the training scheduler and blocks until Ctrl-C. An in-flight
/// training run is allowed to finish before returning.
pub async fn execute(config: &Config) -> Result<()> {
    if !config.schedule.enabled {
        output::hint("set `[schedule] enabled = true` to train periodically");
        return Err(ConfigError::InvalidValue {
            field: "schedule.enabled",
            reason: "the scheduler is disabled".to_string(),
        }
        .into());
    }

    let model: Arc<dyn SimilarityModel> = Arc::new(bootstrap::build_gateway(&config.model));
    let scheduler = bootstrap::build_scheduler(config, model)?;

    output::banner();
    output::field("Interpreter", &config.model.interpreter);
    output::field("Root", config.model.root.display());
    output::field("Interval", format!("{}s", config.schedule.interval_secs));

    let handle = scheduler.start();
    signal::ctrl_c().await?;
    info!("Shutdown signal received");

    let stats = handle.shutdown().await;
    if output::is_json() {
        output::document(json!({
            "command": "run",
            "succeeded": stats.succeeded(),
            "failed": stats.failed(),
        }));
        return Ok(());
    }
    output::field("Succeeded", stats.succeeded());
    output::field("Failed", stats.failed());
    Ok(())
}
