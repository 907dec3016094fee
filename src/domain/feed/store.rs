use super::Feed;
use crate::domain::shared::{Page, PageRequest};
use crate::error::AppResult;
use async_trait::async_trait;

/// Persistence for registered feeds
#[async_trait]
pub trait FeedStore: Send + Sync {
    /// Inserts a feed; a URL that is already registered yields `AppError::Conflict`
    async fn create(&self, url: &str, is_test_source: bool) -> AppResult<Feed>;

    async fn find_by_id(&self, feed_id: i64) -> AppResult<Option<Feed>>;

    /// Feeds ordered by creation time, newest first
    async fn list(&self, page: PageRequest) -> AppResult<Page<Feed>>;

    /// Removes the feed and all of its items
    async fn delete(&self, feed_id: i64) -> AppResult<bool>;

    async fn delete_all(&self) -> AppResult<u64>;

    async fn count(&self) -> AppResult<i64>;

    /// Feed with the most recent successful fetch
    async fn latest_success(&self) -> AppResult<Option<Feed>>;

    /// Feed with the most recent recorded failure that is still uncleared
    async fn latest_error(&self) -> AppResult<Option<Feed>>;
}
