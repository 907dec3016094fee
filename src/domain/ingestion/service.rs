use super::error::IngestError;
use super::{
    FeedFetcher, FeedLocks, FeedOutcome, FetchError, FetchLog, IngestResult, IngestSummary,
    IngestionStore, OutcomeStatus,
};
use crate::domain::feed::Feed;
use crate::domain::parser::{self, ParsedFeed};
use crate::domain::shared::Clock;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::{Duration, Instant};

pub const DEFAULT_FEED_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_MAX_CONCURRENT: usize = 10;

#[derive(Debug, Clone, Copy)]
pub struct IngestionOptions {
    /// Upper bound for fetching and parsing one feed
    pub feed_timeout: Duration,
    /// Feeds processed in parallel by `ingest_all`
    pub max_concurrent: usize,
}

impl Default for IngestionOptions {
    fn default() -> Self {
        Self {
            feed_timeout: DEFAULT_FEED_TIMEOUT,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
        }
    }
}

pub struct IngestionService {
    store: Arc<dyn IngestionStore>,
    fetcher: Arc<dyn FeedFetcher>,
    clock: Arc<dyn Clock>,
    locks: FeedLocks,
    fetch_log: Arc<FetchLog>,
    options: IngestionOptions,
}

impl IngestionService {
    pub fn new(
        store: Arc<dyn IngestionStore>,
        fetcher: Arc<dyn FeedFetcher>,
        clock: Arc<dyn Clock>,
        fetch_log: Arc<FetchLog>,
        options: IngestionOptions,
    ) -> Self {
        Self {
            store,
            fetcher,
            clock,
            locks: FeedLocks::new(),
            fetch_log,
            options,
        }
    }
}

#[async_trait]
pub trait IngestionServiceApi: Send + Sync {
    /// Fetch, parse and upsert one feed. Waits while another ingestion of the
    /// same feed is in flight. Fetch and parse failures are recorded on the feed
    /// before they are returned.
    async fn ingest_feed(&self, feed_id: i64) -> Result<IngestResult, IngestError>;

    /// Ingest every feed independently; per-feed failures are counted in the summary.
    /// Only a failure to list the feeds is returned as an error.
    async fn ingest_all(&self, exclude_test_sources: bool) -> Result<IngestSummary, IngestError>;
}

#[async_trait]
impl IngestionServiceApi for IngestionService {
    async fn ingest_feed(&self, feed_id: i64) -> Result<IngestResult, IngestError> {
        let _guard = self.locks.lock(feed_id).await;

        let feed = self
            .store
            .find_feed(feed_id)
            .await?
            .ok_or(IngestError::NotFound)?;

        self.run(&feed).await
    }

    async fn ingest_all(&self, exclude_test_sources: bool) -> Result<IngestSummary, IngestError> {
        let started = Instant::now();
        let feeds = self.store.feeds_for_ingestion(exclude_test_sources).await?;

        if feeds.is_empty() {
            tracing::debug!(exclude_test_sources, "No feeds to ingest");
            return Ok(IngestSummary::default());
        }

        let mut outcomes: Vec<FeedOutcome> = stream::iter(feeds)
            .map(|feed| self.ingest_batch_member(feed))
            .buffer_unordered(self.options.max_concurrent.max(1))
            .collect()
            .await;
        outcomes.sort_by_key(|o| o.feed_id);

        let mut summary = IngestSummary::default();
        for outcome in outcomes {
            summary.record(outcome);
        }

        tracing::info!(
            feeds = summary.feeds,
            created = summary.created,
            updated = summary.updated,
            errors = summary.errors,
            skipped = summary.skipped,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "{}",
            summary.message()
        );

        Ok(summary)
    }
}

impl IngestionService {
    async fn ingest_batch_member(&self, feed: Feed) -> FeedOutcome {
        let Some(_guard) = self.locks.try_lock(feed.id) else {
            tracing::debug!(feed_id = feed.id, url = %feed.url, "Feed busy, skipping");
            return FeedOutcome {
                feed_id: feed.id,
                feed_url: feed.url,
                status: OutcomeStatus::Skipped,
                created: 0,
                updated: 0,
                error: None,
            };
        };

        match self.run(&feed).await {
            Ok(result) => FeedOutcome {
                feed_id: feed.id,
                feed_url: feed.url,
                status: OutcomeStatus::Success,
                created: result.created,
                updated: result.updated,
                error: None,
            },
            Err(err) => FeedOutcome {
                feed_id: feed.id,
                feed_url: feed.url,
                status: OutcomeStatus::Error,
                created: 0,
                updated: 0,
                error: Some(err.to_string()),
            },
        }
    }

    /// Caller must hold the feed's lock
    async fn run(&self, feed: &Feed) -> Result<IngestResult, IngestError> {
        let started = Instant::now();

        let parsed = match self.fetch_and_parse(&feed.url).await {
            Ok(parsed) => parsed,
            Err(err) => {
                self.record_failure(feed, &err).await?;
                return Err(err);
            }
        };

        let now = self.clock.now();
        let counts = self.store.commit_success(feed.id, &parsed, now).await?;
        let result = IngestResult {
            created: counts.created,
            updated: counts.updated,
        };

        tracing::info!(
            feed_id = feed.id,
            url = %feed.url,
            items = parsed.len(),
            created = result.created,
            updated = result.updated,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Feed ingested"
        );
        self.fetch_log.success(
            now,
            &feed.url,
            format!(
                "Successfully fetched feed: {} created, {} updated",
                result.created, result.updated
            ),
        );

        Ok(result)
    }

    async fn fetch_and_parse(&self, url: &str) -> Result<ParsedFeed, IngestError> {
        let work = async {
            let document = self.fetcher.fetch(url).await?;
            let parsed = parser::parse(&document.body)?;
            Ok::<_, IngestError>(parsed)
        };

        match tokio::time::timeout(self.options.feed_timeout, work).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::network(format!(
                "request timed out after {}s",
                self.options.feed_timeout.as_secs_f32()
            ))
            .into()),
        }
    }

    async fn record_failure(&self, feed: &Feed, err: &IngestError) -> Result<(), IngestError> {
        let now = self.clock.now();
        let message = err.to_string();

        tracing::warn!(
            feed_id = feed.id,
            url = %feed.url,
            error = %message,
            "Feed ingestion failed"
        );
        self.fetch_log
            .error(now, &feed.url, format!("Failed to fetch feed: {}", message));

        self.store.record_failure(feed.id, &message, now).await?;
        Ok(())
    }
}
