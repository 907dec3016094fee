#![allow(dead_code)]

pub mod feed_server;
pub mod memory_store;

use chrono::{DateTime, TimeZone, Utc};
use feedhub_backend::domain::feed::{FeedService, TestSourceClassifier};
use feedhub_backend::domain::ingestion::{FetchLog, IngestionOptions, IngestionService};
use feedhub_backend::domain::item::ItemService;
use feedhub_backend::domain::shared::Clock;
use feedhub_backend::domain::stats::StatsService;
use feedhub_backend::infrastructure::fetcher::{ReqwestFeedFetcher, DEFAULT_MAX_BODY_BYTES};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

pub use feed_server::FeedServer;
pub use memory_store::InMemoryStore;

/// Clock that only moves when told to
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn advance(&self, by: chrono::Duration) {
        *self.now.lock() += by;
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock() = now;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

/// Services wired over one in-memory store and the real reqwest fetcher
pub struct Harness {
    pub store: Arc<InMemoryStore>,
    pub clock: Arc<ManualClock>,
    pub fetch_log: Arc<FetchLog>,
    pub feeds: FeedService,
    pub items: ItemService,
    pub stats: StatsService,
    pub ingestion: Arc<IngestionService>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_options(IngestionOptions {
            feed_timeout: Duration::from_secs(5),
            max_concurrent: 4,
        })
    }

    pub fn with_options(options: IngestionOptions) -> Self {
        let store = Arc::new(InMemoryStore::new());
        let clock = Arc::new(ManualClock::new(start_time()));
        let fetch_log = Arc::new(FetchLog::default());
        let fetcher = Arc::new(
            ReqwestFeedFetcher::new(
                "feedhub-backend-tests",
                Duration::from_secs(5),
                DEFAULT_MAX_BODY_BYTES,
            )
            .expect("Failed to build fetcher"),
        );

        Self {
            feeds: FeedService::new(store.clone(), TestSourceClassifier::default()),
            items: ItemService::new(store.clone(), store.clone()),
            stats: StatsService::new(store.clone(), store.clone()),
            ingestion: Arc::new(IngestionService::new(
                store.clone(),
                fetcher,
                clock.clone(),
                fetch_log.clone(),
                options,
            )),
            store,
            clock,
            fetch_log,
        }
    }
}
