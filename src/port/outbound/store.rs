//! Persistence port for model generations.
//!
//! The store exclusively owns the model root. Versioning is encoded in
//! directory names today; keeping list / latest / create / retire behind this
//! trait lets a metadata-backed store replace it without touching the
//! training pipeline or the prediction invoker.

use async_trait::async_trait;

use crate::domain::generation::{GenerationId, GenerationStatus, ModelGeneration};
use crate::error::Result;

/// Storage operations for on-disk model generations.
///
/// # Concurrency
///
/// The store provides no locking. Callers serialize training runs; reads
/// (`list`, `latest`, `status`) are safe to run concurrently with each other.
#[async_trait]
pub trait GenerationStore: Send + Sync {
    /// All generation directories present in the model root, in any state.
    ///
    /// A missing model root is an empty store, not an error.
    async fn list(&self) -> Result<Vec<ModelGeneration>>;

    /// State of one generation.
    async fn status(&self, generation: &ModelGeneration) -> Result<GenerationStatus>;

    /// The usable generation with the greatest timestamp, if any.
    async fn latest(&self) -> Result<Option<ModelGeneration>>;

    /// Allocate a new, empty generation directory.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::GenerationExists`](crate::error::ModelError::GenerationExists)
    /// if a directory for `id` already exists; nothing is overwritten.
    async fn create(&self, id: GenerationId) -> Result<ModelGeneration>;

    /// Record that the run which allocated `generation` failed.
    ///
    /// The directory stays in place for postmortem but is never returned by
    /// [`latest`](Self::latest).
    async fn mark_failed(&self, generation: &ModelGeneration, reason: &str) -> Result<()>;

    /// Delete every generation other than `keep`. Returns how many were removed.
    async fn retire_all_except(&self, keep: &ModelGeneration) -> Result<usize>;
}
