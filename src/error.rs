use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::domain::error::DomainError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// How an external model process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptExit {
    /// The process exited with this status code.
    Code(i32),
    /// The process was terminated by a signal and reported no code.
    Signal,
    /// The wall-clock limit expired and the process was killed.
    TimedOut { after: Duration },
}

impl ScriptExit {
    #[must_use]
    pub fn is_success(self) -> bool {
        self == Self::Code(0)
    }
}

impl fmt::Display for ScriptExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code(code) => write!(f, "{code}"),
            Self::Signal => write!(f, "signal"),
            Self::TimedOut { after } => write!(f, "timeout after {after:?}"),
        }
    }
}

/// Similarity model lifecycle errors.
///
/// Callers can tell "wait for training" apart from "alert an operator" with
/// [`ModelError::is_client_error`].
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("required dependency \"{dependency}\" was not found: {details}")]
    MissingDependency { dependency: String, details: String },

    #[error("no trained model found; train a model before requesting predictions")]
    NotTrained,

    #[error("model script failed ({exit}): {stderr}")]
    ScriptFailure { exit: ScriptExit, stderr: String },

    #[error("model script produced invalid output {output:?}: {source}")]
    InvalidOutput {
        output: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("trainer exited cleanly but left no model artifacts in {}", path.display())]
    MissingArtifacts { path: PathBuf },

    #[error("model generation directory already exists: {}", path.display())]
    GenerationExists { path: PathBuf },

    #[error("a training run is already in progress")]
    TrainingInProgress,
}

impl ModelError {
    /// True when the caller can recover without operator intervention.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::NotTrained | Self::TrainingInProgress)
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// The lifecycle error behind this error, if any.
    #[must_use]
    pub fn as_model(&self) -> Option<&ModelError> {
        match self {
            Self::Model(err) => Some(err),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
