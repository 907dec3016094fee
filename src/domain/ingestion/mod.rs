pub mod error;
pub mod fetch_log;
pub mod fetcher;
pub mod locks;
pub mod model;
pub mod scheduler;
pub mod service;
pub mod store;

pub use error::IngestError;
pub use fetch_log::{FetchLog, FetchLogEntry, FetchLogKind};
pub use fetcher::{FeedFetcher, FetchError, FetchedDocument};
pub use locks::FeedLocks;
pub use model::{FeedOutcome, IngestResult, IngestSummary, IngestSummaryResponse, OutcomeStatus};
pub use scheduler::{IntervalTicker, Scheduler, SchedulerHandle, Ticker};
pub use service::{IngestionOptions, IngestionService, IngestionServiceApi};
pub use store::{IngestionStore, UpsertCounts};
