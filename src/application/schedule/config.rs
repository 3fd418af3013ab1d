//! Training schedule configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Configuration for periodic retraining.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ScheduleConfig {
    /// Whether `simlife run` retrains periodically.
    #[serde(default)]
    pub enabled: bool,
    /// Interval between training runs in seconds.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Train once immediately when the scheduler starts.
    #[serde(default = "default_train_on_start")]
    pub train_on_start: bool,
    /// JSON-lines file the rows are read from on every run.
    #[serde(default)]
    pub source: Option<PathBuf>,
}

impl ScheduleConfig {
    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_secs: default_interval_secs(),
            train_on_start: default_train_on_start(),
            source: None,
        }
    }
}

const fn default_interval_secs() -> u64 {
    86_400
}

const fn default_train_on_start() -> bool {
    true
}
