//! Similarity model configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Where the external model process lives and how long it may run.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ModelConfig {
    /// Interpreter used for the probe, the trainer and the predictor.
    #[serde(default = "default_interpreter")]
    pub interpreter: String,
    /// Arguments for the availability probe.
    #[serde(default = "default_probe_args")]
    pub probe_args: Vec<String>,
    /// Directory holding one subdirectory per model generation.
    #[serde(default = "default_root")]
    pub root: PathBuf,
    /// Trainer script: `<script> <csv_path> <generation_dir>`.
    #[serde(default = "default_train_script")]
    pub train_script: PathBuf,
    /// Predictor script: `<script> <product_id> <model_file> <matrix_file>`.
    #[serde(default = "default_predict_script")]
    pub predict_script: PathBuf,
    /// Wall-clock limit for a training run in seconds (0 disables).
    #[serde(default = "default_train_timeout")]
    pub train_timeout_secs: u64,
    /// Wall-clock limit for a prediction in seconds (0 disables).
    #[serde(default = "default_predict_timeout")]
    pub predict_timeout_secs: u64,
    /// Wall-clock limit for the availability probe in seconds (0 disables).
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_secs: u64,
}

impl ModelConfig {
    #[must_use]
    pub fn train_timeout(&self) -> Option<Duration> {
        limit(self.train_timeout_secs)
    }

    #[must_use]
    pub fn predict_timeout(&self) -> Option<Duration> {
        limit(self.predict_timeout_secs)
    }

    #[must_use]
    pub fn probe_timeout(&self) -> Option<Duration> {
        limit(self.probe_timeout_secs)
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            interpreter: default_interpreter(),
            probe_args: default_probe_args(),
            root: default_root(),
            train_script: default_train_script(),
            predict_script: default_predict_script(),
            train_timeout_secs: default_train_timeout(),
            predict_timeout_secs: default_predict_timeout(),
            probe_timeout_secs: default_probe_timeout(),
        }
    }
}

fn limit(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

fn default_interpreter() -> String {
    "python3".to_string()
}

fn default_probe_args() -> Vec<String> {
    vec!["--version".to_string()]
}

fn default_root() -> PathBuf {
    PathBuf::from("models")
}

fn default_train_script() -> PathBuf {
    PathBuf::from("scripts/train.py")
}

fn default_predict_script() -> PathBuf {
    PathBuf::from("scripts/predict.py")
}

const fn default_train_timeout() -> u64 {
    3600
}

const fn default_predict_timeout() -> u64 {
    30
}

const fn default_probe_timeout() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_disables_timeouts() {
        let config = ModelConfig {
            train_timeout_secs: 0,
            ..ModelConfig::default()
        };
        assert_eq!(config.train_timeout(), None);
        assert_eq!(config.predict_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.probe_timeout(), Some(Duration::from_secs(10)));
    }

    #[test]
    fn empty_table_uses_defaults() {
        let config: ModelConfig = toml::from_str("").unwrap();
        assert_eq!(config, ModelConfig::default());
        assert_eq!(config.interpreter, "python3");
        assert_eq!(config.probe_args, vec!["--version"]);
    }
}
