//! Periodic training service.
//!
//! Background task that retrains the similarity model on a fixed interval,
//! optionally once at startup. A failed run is logged and the schedule
//! continues; it never takes the host down.
//!
//! ```text
//! interval tick ──▶ TrainingSource::open() ──▶ SimilarityModel::train()
//!        ▲                                              │
//!        └──────────── next tick (errors logged) ◀──────┘
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

use crate::error::Result;
use crate::port::inbound::similarity::SimilarityModel;
use crate::port::outbound::source::TrainingSource;

/// Counters shared between the scheduler task and its handle.
#[derive(Debug, Default)]
pub struct ScheduleStats {
    succeeded: AtomicU64,
    failed: AtomicU64,
}

impl ScheduleStats {
    #[must_use]
    pub fn succeeded(&self) -> u64 {
        self.succeeded.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }
}

/// Handle for controlling the scheduler lifecycle.
pub struct TrainingSchedulerHandle {
    shutdown_tx: mpsc::Sender<()>,
    task: JoinHandle<()>,
    stats: Arc<ScheduleStats>,
}

impl TrainingSchedulerHandle {
    #[must_use]
    pub fn stats(&self) -> &ScheduleStats {
        &self.stats
    }

    /// Signal the scheduler to stop and wait for an in-flight run to finish.
    ///
    /// Returns the final counters.
    pub async fn shutdown(self) -> Arc<ScheduleStats> {
        let _ = self.shutdown_tx.send(()).await;
        let _ = self.task.await;
        self.stats
    }
}

/// Retrains the model from a training source on a fixed interval.
pub struct TrainingScheduler {
    source: Arc<dyn TrainingSource>,
    model: Arc<dyn SimilarityModel>,
    interval: Duration,
    train_on_start: bool,
    stats: Arc<ScheduleStats>,
}

impl TrainingScheduler {
    pub fn new(
        source: Arc<dyn TrainingSource>,
        model: Arc<dyn SimilarityModel>,
        interval: Duration,
        train_on_start: bool,
    ) -> Self {
        Self {
            source,
            model,
            interval,
            train_on_start,
            stats: Arc::new(ScheduleStats::default()),
        }
    }

    /// Run a single training pass from a freshly opened source.
    pub async fn run_once(&self) -> Result<()> {
        let started = Instant::now();
        info!(source = self.source.name(), "Starting scheduled training");

        let result = async {
            let rows = self.source.open().await?;
            self.model.train(rows).await
        }
        .await;

        match &result {
            Ok(()) => {
                self.stats.succeeded.fetch_add(1, Ordering::Relaxed);
                info!(
                    duration_ms = started.elapsed().as_millis() as u64,
                    "Scheduled training complete"
                );
            }
            Err(e) => {
                self.stats.failed.fetch_add(1, Ordering::Relaxed);
                error!(error = %e, "Scheduled training failed");
            }
        }
        result
    }

    /// Spawn the scheduler loop.
    pub fn start(self) -> TrainingSchedulerHandle {
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);
        let stats = Arc::clone(&self.stats);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            if !self.train_on_start {
                // The first tick completes immediately.
                ticker.tick().await;
            }

            info!(interval_secs = self.interval.as_secs(), "Training scheduler started");
            loop {
                tokio::select! {
                    _ = shutdown_rx.recv() => {
                        info!("Training scheduler shutting down");
                        break;
                    }
                    _ = ticker.tick() => {
                        let _ = self.run_once().await;
                    }
                }
            }
        });

        TrainingSchedulerHandle {
            shutdown_tx,
            task,
            stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::id::ProductId;
    use crate::error::ModelError;
    use crate::port::inbound::similarity::TrainingRows;
    use crate::testkit::domain::{row, rows};
    use async_trait::async_trait;
    use futures_util::StreamExt;
    use parking_lot::Mutex;
    use rust_decimal_macros::dec;

    struct FixedSource;

    #[async_trait]
    impl TrainingSource for FixedSource {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn open(&self) -> Result<TrainingRows> {
            Ok(rows(vec![row("A", "X", dec!(1), 1), row("B", "Y", dec!(2), 2)]))
        }
    }

    /// Records how many rows each training call consumed.
    #[derive(Default)]
    struct CountingModel {
        runs: Mutex<Vec<usize>>,
        fail: bool,
    }

    #[async_trait]
    impl SimilarityModel for CountingModel {
        async fn train(&self, rows: TrainingRows) -> Result<()> {
            let count = rows.count().await;
            self.runs.lock().push(count);
            if self.fail {
                return Err(ModelError::NotTrained.into());
            }
            Ok(())
        }

        async fn predict(&self, _product_id: &ProductId) -> Result<Vec<ProductId>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn run_once_consumes_a_fresh_source() {
        let model = Arc::new(CountingModel::default());
        let scheduler =
            TrainingScheduler::new(Arc::new(FixedSource), model.clone(), Duration::from_secs(60), true);

        scheduler.run_once().await.unwrap();
        scheduler.run_once().await.unwrap();

        assert_eq!(*model.runs.lock(), vec![2, 2]);
        assert_eq!(scheduler.stats.succeeded(), 2);
    }

    #[tokio::test]
    async fn failures_are_counted_not_propagated_by_loop() {
        let model = Arc::new(CountingModel {
            fail: true,
            ..CountingModel::default()
        });
        let handle = TrainingScheduler::new(
            Arc::new(FixedSource),
            model.clone(),
            Duration::from_secs(3600),
            true,
        )
        .start();

        while handle.stats().failed() == 0 {
            tokio::task::yield_now().await;
        }
        handle.shutdown().await;

        assert_eq!(model.runs.lock().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn skips_startup_run_when_disabled() {
        let model = Arc::new(CountingModel::default());
        let handle = TrainingScheduler::new(
            Arc::new(FixedSource),
            model.clone(),
            Duration::from_secs(10),
            false,
        )
        .start();

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(model.runs.lock().is_empty());

        tokio::time::sleep(Duration::from_secs(6)).await;
        assert_eq!(model.runs.lock().len(), 1);

        handle.shutdown().await;
    }
}
