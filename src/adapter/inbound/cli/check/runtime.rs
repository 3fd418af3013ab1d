use std::sync::Arc;

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::adapter::outbound::process::runner::TokioProcessRunner;
use crate::error::{ModelError, Result};
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::store::GenerationStore;

/// Verify the interpreter runs and the model scripts are in place.
pub async fn execute(config: &Config) -> Result<()> {
    let model = &config.model;
    let prober = bootstrap::build_prober(model, Arc::new(TokioProcessRunner::new()));

    let spinner = output::Spinner::start(&format!("Probing {}", model.interpreter));
    let version = prober.version().await;
    match &version {
        Some(_) => spinner.done("Interpreter available"),
        None => spinner.fail("Interpreter not available"),
    }

    let train_script = model.train_script.is_file();
    let predict_script = model.predict_script.is_file();
    let latest = bootstrap::build_store(model).latest().await?;

    if output::is_json() {
        output::document(json!({
            "command": "check.runtime",
            "interpreter": model.interpreter,
            "version": version,
            "train_script": train_script,
            "predict_script": predict_script,
            "latest": latest.as_ref().map(|g| g.path().display().to_string()),
        }));
    } else {
        if let Some(version) = &version {
            output::field("Version", version);
        }
        script_line("Trainer", train_script, &model.train_script.display().to_string());
        script_line("Predictor", predict_script, &model.predict_script.display().to_string());
        match &latest {
            Some(generation) => output::field("Latest", generation.path().display()),
            None => output::warning("No trained model yet"),
        }
    }

    if version.is_none() {
        return Err(ModelError::MissingDependency {
            dependency: model.interpreter.clone(),
            details: format!("`{} {}` did not succeed", model.interpreter, model.probe_args.join(" ")),
        }
        .into());
    }
    Ok(())
}

fn script_line(label: &str, present: bool, path: &str) {
    if present {
        output::field(label, path);
    } else {
        output::warning(&format!("{label} script not found: {path}"));
    }
}
