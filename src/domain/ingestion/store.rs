use crate::domain::feed::Feed;
use crate::domain::parser::ParsedFeed;
use crate::error::AppResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Items inserted and matched by one commit
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UpsertCounts {
    pub created: u64,
    pub updated: u64,
}

/// Writes performed by the ingestion coordinator
#[async_trait]
pub trait IngestionStore: Send + Sync {
    async fn find_feed(&self, feed_id: i64) -> AppResult<Option<Feed>>;

    /// All feeds oldest first, optionally without the test sources
    async fn feeds_for_ingestion(&self, exclude_test_sources: bool) -> AppResult<Vec<Feed>>;

    /// Sets `last_error`/`last_error_at` together, leaving `last_success_at` alone
    async fn record_failure(
        &self,
        feed_id: i64,
        message: &str,
        at: DateTime<Utc>,
    ) -> AppResult<()>;

    /// Upserts every parsed item keyed by (feed, natural key), refreshes the feed
    /// metadata, advances `last_success_at` and clears the error pair, all atomically.
    /// Returns `AppError::NotFound` when the feed no longer exists.
    async fn commit_success(
        &self,
        feed_id: i64,
        parsed: &ParsedFeed,
        at: DateTime<Utc>,
    ) -> AppResult<UpsertCounts>;
}
