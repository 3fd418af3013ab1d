use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::infrastructure::config::settings::Config;

/// Report the effective configuration.
///
/// Loading and validation already happened before dispatch, so reaching this
/// handler means the file is valid.
pub fn execute(config: &Config, path: &Path) {
    let model = &config.model;
    let schedule = &config.schedule;

    if output::is_json() {
        output::document(json!({
            "command": "check.config",
            "status": "valid",
            "config": path.display().to_string(),
            "interpreter": model.interpreter,
            "root": model.root.display().to_string(),
            "train_script": model.train_script.display().to_string(),
            "predict_script": model.predict_script.display().to_string(),
            "schedule_enabled": schedule.enabled,
        }));
        return;
    }

    output::section("Configuration Check");
    output::field("Config", path.display());
    if !path.exists() {
        output::note("File not found, using built-in defaults");
    }
    output::success("Configuration is valid");

    output::section("Model");
    output::field("Interpreter", &model.interpreter);
    output::field("Root", model.root.display());
    output::field("Trainer", model.train_script.display());
    output::field("Predictor", model.predict_script.display());
    output::field("Timeouts", timeouts(config));

    output::section("Schedule");
    if schedule.enabled {
        output::field("Interval", format!("{}s", schedule.interval_secs));
        output::field("On start", schedule.train_on_start);
        if let Some(source) = &schedule.source {
            output::field("Source", source.display());
        }
    } else {
        output::field("Schedule", "disabled");
    }
}

fn timeouts(config: &Config) -> String {
    let show = |secs: u64| {
        if secs == 0 {
            "none".to_string()
        } else {
            format!("{secs}s")
        }
    };
    format!(
        "train {}, predict {}, probe {}",
        show(config.model.train_timeout_secs),
        show(config.model.predict_timeout_secs),
        show(config.model.probe_timeout_secs)
    )
}
