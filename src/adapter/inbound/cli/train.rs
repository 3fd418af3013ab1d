//! Handler for the `train` command.

use serde_json::json;

use crate::adapter::inbound::cli::command::TrainArgs;
use crate::adapter::inbound::cli::output;
use crate::adapter::outbound::source::jsonl::JsonLinesSource;
use crate::error::{ConfigError, Result};
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::source::TrainingSource;

/// Execute the train command.
pub async fn execute(config: &Config, args: &TrainArgs) -> Result<()> {
    let Some(path) = args.source.clone().or_else(|| config.schedule.source.clone()) else {
        return Err(ConfigError::MissingField {
            field: "--source or schedule.source",
        }
        .into());
    };

    let source = JsonLinesSource::new(path);
    let gateway = bootstrap::build_gateway(&config.model);

    let spinner = output::Spinner::start(&format!("Training from {}", source.name()));
    let result = async {
        let rows = source.open().await?;
        gateway.train_with_report(rows).await
    }
    .await;

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            spinner.fail("Training failed");
            return Err(e);
        }
    };
    spinner.done("Model trained");

    if output::is_json() {
        output::document(json!({
            "generation": report.generation.path().display().to_string(),
            "created_at_ms": report.generation.created_at_epoch_ms(),
            "rows": report.rows,
            "retired": report.retired,
        }));
        return Ok(());
    }

    output::field("Generation", report.generation.path().display());
    output::field("Rows", report.rows);
    output::field("Retired", report.retired);
    Ok(())
}
