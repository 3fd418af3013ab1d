//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file with environment variable overrides
//! for the deployment-specific values `SIMLIFE_INTERPRETER` and
//! `SIMLIFE_MODEL_ROOT`.
//!
//! # Example
//!
//! ```no_run
//! use simlife::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::logging::LoggingConfig;
use crate::application::schedule::config::ScheduleConfig;
use crate::application::similarity::config::ModelConfig;
use crate::error::{ConfigError, Result};

/// Environment variable overriding `model.interpreter`.
pub const INTERPRETER_ENV: &str = "SIMLIFE_INTERPRETER";
/// Environment variable overriding `model.root`.
pub const MODEL_ROOT_ENV: &str = "SIMLIFE_MODEL_ROOT";

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`]. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// External model process and generation storage.
    #[serde(default)]
    pub model: ModelConfig,

    /// Periodic retraining used by `simlife run`.
    #[serde(default)]
    pub schedule: ScheduleConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// Applies environment overrides before validating.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is
    /// malformed, or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load configuration, falling back to defaults when the file is absent.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::parse_toml(&content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Self::parse_toml(""),
            Err(e) => Err(ConfigError::ReadFile(e).into()),
        }
    }

    /// Apply environment overrides through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(interpreter) = lookup(INTERPRETER_ENV).filter(|v| !v.is_empty()) {
            self.model.interpreter = interpreter;
        }
        if let Some(root) = lookup(MODEL_ROOT_ENV).filter(|v| !v.is_empty()) {
            self.model.root = PathBuf::from(root);
        }
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        if !self.logging.is_known_format() {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: format!("expected \"pretty\" or \"json\", got {:?}", self.logging.format),
            }
            .into());
        }

        if self.model.interpreter.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "model.interpreter",
            }
            .into());
        }
        if self.model.root.as_os_str().is_empty() {
            return Err(ConfigError::MissingField { field: "model.root" }.into());
        }
        if self.model.train_script.as_os_str().is_empty() {
            return Err(ConfigError::MissingField {
                field: "model.train_script",
            }
            .into());
        }
        if self.model.predict_script.as_os_str().is_empty() {
            return Err(ConfigError::MissingField {
                field: "model.predict_script",
            }
            .into());
        }

        if self.schedule.enabled {
            if self.schedule.interval_secs == 0 {
                return Err(ConfigError::InvalidValue {
                    field: "schedule.interval_secs",
                    reason: "must be greater than 0".to_string(),
                }
                .into());
            }
            if self.schedule.source.is_none() {
                return Err(ConfigError::MissingField {
                    field: "schedule.source",
                }
                .into());
            }
        }

        Ok(())
    }

    /// Initialize the global tracing subscriber.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn parse(content: &str) -> Result<Config> {
        let mut config: Config = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_overrides(|_| None);
        config.validate()?;
        Ok(config)
    }

    #[test]
    fn empty_file_yields_defaults() {
        let config = parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.model.interpreter, "python3");
        assert!(!config.schedule.enabled);
    }

    #[test]
    fn overrides_replace_interpreter_and_root() {
        let mut config = parse("[model]\ninterpreter = \"python3\"\n").unwrap();
        config.apply_overrides(|key| match key {
            INTERPRETER_ENV => Some("/opt/py/bin/python".to_string()),
            MODEL_ROOT_ENV => Some("/var/lib/simlife".to_string()),
            _ => None,
        });

        assert_eq!(config.model.interpreter, "/opt/py/bin/python");
        assert_eq!(config.model.root, PathBuf::from("/var/lib/simlife"));
    }

    #[test]
    fn empty_override_is_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|_| Some(String::new()));
        assert_eq!(config.model.interpreter, "python3");
    }

    #[test]
    fn rejects_blank_interpreter() {
        let err = parse("[model]\ninterpreter = \"  \"\n").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::MissingField {
                field: "model.interpreter"
            })
        ));
    }

    #[test]
    fn enabled_schedule_requires_source() {
        let err = parse("[schedule]\nenabled = true\n").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::MissingField {
                field: "schedule.source"
            })
        ));
    }

    #[test]
    fn enabled_schedule_requires_interval() {
        let err = parse("[schedule]\nenabled = true\nsource = \"s.jsonl\"\ninterval_secs = 0\n")
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue {
                field: "schedule.interval_secs",
                ..
            })
        ));
    }

    #[test]
    fn rejects_unknown_log_format() {
        let err = parse("[logging]\nformat = \"xml\"\n").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue {
                field: "logging.format",
                ..
            })
        ));
    }
}
