use super::IngestionServiceApi;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Interval, MissedTickBehavior};

/// Source of scheduler ticks. Returns `false` once no more ticks will come.
#[async_trait]
pub trait Ticker: Send {
    async fn tick(&mut self) -> bool;
}

/// Fixed-period ticker; the first tick completes immediately and missed ticks are dropped
pub struct IntervalTicker {
    interval: Interval,
}

impl IntervalTicker {
    pub fn new(period: Duration) -> Self {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self { interval }
    }
}

#[async_trait]
impl Ticker for IntervalTicker {
    async fn tick(&mut self) -> bool {
        self.interval.tick().await;
        true
    }
}

/// Periodically ingests every feed that is not a test source.
/// Batches run one after another on a single task, so they never overlap.
pub struct Scheduler {
    ingestion: Arc<dyn IngestionServiceApi>,
}

impl Scheduler {
    pub fn new(ingestion: Arc<dyn IngestionServiceApi>) -> Self {
        Self { ingestion }
    }

    pub fn start<T>(self, mut ticker: T) -> SchedulerHandle
    where
        T: Ticker + 'static,
    {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            tracing::info!("Background fetch started");
            loop {
                tokio::select! {
                    biased;
                    _ = shutdown_rx.changed() => break,
                    ticked = ticker.tick() => {
                        if !ticked {
                            break;
                        }
                        self.run_batch().await;
                    }
                }
            }
            tracing::info!("Background fetch stopped");
        });

        SchedulerHandle { shutdown_tx, task }
    }

    async fn run_batch(&self) {
        match self.ingestion.ingest_all(true).await {
            Ok(summary) => tracing::debug!(
                created = summary.created,
                updated = summary.updated,
                errors = summary.errors,
                "Background fetch batch finished"
            ),
            Err(e) => tracing::error!(error = %e, "Background fetch batch failed"),
        }
    }
}

pub struct SchedulerHandle {
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Signals the loop and waits for the batch in progress, if any, to finish
    pub async fn stop(self) {
        let _ = self.shutdown_tx.send(true);
        if let Err(e) = self.task.await {
            tracing::error!(error = %e, "Scheduler task ended abnormally");
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
