//! Filesystem-backed generation store.
//!
//! Each generation is a subdirectory of the model root whose name encodes its
//! creation timestamp. A directory becomes the current model simply by being
//! the newest usable one; there is no separate commit marker.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, info, warn};

use crate::domain::generation::{GenerationId, GenerationStatus, ModelGeneration};
use crate::error::{Error, ModelError, Result};
use crate::port::outbound::store::GenerationStore;

/// Generation store rooted at a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct FsGenerationStore {
    root: PathBuf,
}

impl FsGenerationStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

async fn exists(path: &Path) -> Result<bool> {
    Ok(fs::try_exists(path).await?)
}

#[async_trait]
impl GenerationStore for FsGenerationStore {
    async fn list(&self) -> Result<Vec<ModelGeneration>> {
        let mut entries = match fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(root = %self.root.display(), "Model root does not exist yet");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut generations = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_dir() {
                continue;
            }
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            match GenerationId::parse_dir_name(name) {
                Ok(id) => generations.push(ModelGeneration::new(id, entry.path())),
                Err(_) => debug!(entry = name, "Ignoring non-generation entry in model root"),
            }
        }

        generations.sort_by_key(ModelGeneration::id);
        debug!(root = %self.root.display(), count = generations.len(), "Listed generations");
        Ok(generations)
    }

    async fn status(&self, generation: &ModelGeneration) -> Result<GenerationStatus> {
        if exists(&generation.failure_record()).await? {
            return Ok(GenerationStatus::Failed);
        }

        let artifacts = generation.artifacts();
        if exists(&artifacts.model_file).await? && exists(&artifacts.matrix_file).await? {
            Ok(GenerationStatus::Usable)
        } else {
            Ok(GenerationStatus::Incomplete)
        }
    }

    async fn latest(&self) -> Result<Option<ModelGeneration>> {
        let mut generations = self.list().await?;
        generations.reverse();

        for generation in generations {
            match self.status(&generation).await? {
                GenerationStatus::Usable => return Ok(Some(generation)),
                status => debug!(generation = %generation, %status, "Skipping generation"),
            }
        }
        Ok(None)
    }

    async fn create(&self, id: GenerationId) -> Result<ModelGeneration> {
        fs::create_dir_all(&self.root).await?;

        let path = self.root.join(id.dir_name());
        let legacy = self.root.join(format!("model_{id}"));
        if exists(&legacy).await? {
            return Err(ModelError::GenerationExists { path: legacy }.into());
        }

        match fs::create_dir(&path).await {
            Ok(()) => Ok(ModelGeneration::new(id, path)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                Err(ModelError::GenerationExists { path }.into())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn mark_failed(&self, generation: &ModelGeneration, reason: &str) -> Result<()> {
        fs::write(generation.failure_record(), format!("{reason}\n")).await?;
        info!(generation = %generation, "Recorded failed training run");
        Ok(())
    }

    async fn retire_all_except(&self, keep: &ModelGeneration) -> Result<usize> {
        let mut retired = 0;
        let mut first_error: Option<Error> = None;

        for generation in self.list().await? {
            if generation.id() == keep.id() && generation.path() == keep.path() {
                continue;
            }

            match fs::remove_dir_all(generation.path()).await {
                Ok(()) => {
                    info!(generation = %generation, "Retired model generation");
                    retired += 1;
                }
                Err(e) => {
                    warn!(generation = %generation, error = %e, "Error retiring model generation");
                    first_error.get_or_insert(e.into());
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(retired),
        }
    }
}
