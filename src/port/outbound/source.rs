//! Training data source port.
//!
//! Upstream sales repositories are consumed only as a lazy sequence of rows.

use async_trait::async_trait;

use crate::error::Result;
use crate::port::inbound::similarity::TrainingRows;

/// Producer of training rows for one training run.
#[async_trait]
pub trait TrainingSource: Send + Sync {
    /// Return the source name for logging.
    fn name(&self) -> &str;

    /// Open a fresh, lazily evaluated sequence of rows.
    ///
    /// Each call starts from the beginning of the underlying data.
    async fn open(&self) -> Result<TrainingRows>;
}
