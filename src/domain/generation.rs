//! On-disk model generations.
//!
//! A generation is one versioned output of a training run: a directory under
//! the model root named after its creation timestamp. New directories use
//! `model-<epoch_ms>`; the legacy `model_<epoch_ms>` spelling is still read.

use std::fmt;
use std::path::{Path, PathBuf};

use super::error::DomainError;

/// Opaque model artifact written by the trainer.
pub const MODEL_FILE: &str = "model.pkl";

/// Opaque similarity matrix artifact written by the trainer.
pub const MATRIX_FILE: &str = "matriz.pkl";

/// Delimited training data materialized for the trainer.
pub const TRAINING_FILE: &str = "train-data.csv";

/// Postmortem record left behind by a failed training run.
pub const FAILURE_RECORD: &str = "FAILED";

const PREFIX: &str = "model";
const SEPARATORS: [char; 2] = ['-', '_'];

/// Creation timestamp (milliseconds since the Unix epoch) naming a generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GenerationId(i64);

impl GenerationId {
    #[must_use]
    pub const fn from_epoch_ms(epoch_ms: i64) -> Self {
        Self(epoch_ms)
    }

    #[must_use]
    pub const fn epoch_ms(self) -> i64 {
        self.0
    }

    /// Directory name for a newly allocated generation.
    #[must_use]
    pub fn dir_name(self) -> String {
        format!("{PREFIX}-{}", self.0)
    }

    /// Parse a directory name in either the current or the legacy form.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidGenerationName`] when the name does not
    /// match `model-<digits>` or `model_<digits>`.
    pub fn parse_dir_name(name: &str) -> Result<Self, DomainError> {
        let invalid = || DomainError::InvalidGenerationName {
            name: name.to_string(),
        };

        let rest = name.strip_prefix(PREFIX).ok_or_else(invalid)?;
        let digits = rest.strip_prefix(SEPARATORS).ok_or_else(invalid)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        digits.parse::<i64>().map(Self).map_err(|_| invalid())
    }
}

impl fmt::Display for GenerationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One generation directory in the model root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelGeneration {
    id: GenerationId,
    path: PathBuf,
}

impl ModelGeneration {
    #[must_use]
    pub fn new(id: GenerationId, path: impl Into<PathBuf>) -> Self {
        Self {
            id,
            path: path.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> GenerationId {
        self.id
    }

    #[must_use]
    pub fn created_at_epoch_ms(&self) -> i64 {
        self.id.epoch_ms()
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Artifact locations inside this generation.
    #[must_use]
    pub fn artifacts(&self) -> ModelArtifactPaths {
        ModelArtifactPaths {
            model_file: self.path.join(MODEL_FILE),
            matrix_file: self.path.join(MATRIX_FILE),
        }
    }

    #[must_use]
    pub fn training_file(&self) -> PathBuf {
        self.path.join(TRAINING_FILE)
    }

    #[must_use]
    pub fn failure_record(&self) -> PathBuf {
        self.path.join(FAILURE_RECORD)
    }
}

impl fmt::Display for ModelGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// Derived, non-persisted view of the files the predictor consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelArtifactPaths {
    pub model_file: PathBuf,
    pub matrix_file: PathBuf,
}

/// Whether a generation can serve predictions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationStatus {
    /// Both artifacts are present and no failure was recorded.
    Usable,
    /// Artifacts are missing: training is in flight or crashed mid-write.
    Incomplete,
    /// The training run that allocated it failed.
    Failed,
}

impl GenerationStatus {
    #[must_use]
    pub fn is_usable(self) -> bool {
        self == Self::Usable
    }
}

impl fmt::Display for GenerationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Usable => "usable",
            Self::Incomplete => "incomplete",
            Self::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// Pick the generation with the greatest timestamp.
///
/// Ties are not expected; when they occur any maximal entry is acceptable.
#[must_use]
pub fn newest<'a, I>(generations: I) -> Option<&'a ModelGeneration>
where
    I: IntoIterator<Item = &'a ModelGeneration>,
{
    generations.into_iter().max_by_key(|g| g.id())
}
