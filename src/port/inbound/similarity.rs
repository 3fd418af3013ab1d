//! Public contract of the similarity model lifecycle.

use async_trait::async_trait;
use futures_util::stream::BoxStream;

use crate::domain::id::ProductId;
use crate::domain::row::TrainingRow;
use crate::error::Result;

/// Lazy, possibly unbounded sequence of training rows.
///
/// An `Err` item aborts the training run that is consuming the sequence.
pub type TrainingRows = BoxStream<'static, Result<TrainingRow>>;

/// Trains product-similarity models and serves predictions from the latest one.
///
/// Implementations must be thread-safe (`Send + Sync`).
///
/// # Errors
///
/// Failures surface as [`ModelError`](crate::error::ModelError) variants:
/// `MissingDependency` when the interpreter is unavailable, `NotTrained`
/// when predicting before any successful training, `ScriptFailure` when the
/// external process exits non-zero, writes to its error stream or times out.
#[async_trait]
pub trait SimilarityModel: Send + Sync {
    /// Materialize `rows`, train a new generation and retire all others.
    async fn train(&self, rows: TrainingRows) -> Result<()>;

    /// Products similar to `product_id`, most similar first.
    ///
    /// An empty list means the model knows no similar products; it is not
    /// the same as `NotTrained`.
    async fn predict(&self, product_id: &ProductId) -> Result<Vec<ProductId>>;
}
