use super::Item;
use crate::domain::shared::{Page, PageRequest};
use crate::error::AppResult;
use async_trait::async_trait;

/// Read and delete access to stored items; writes go through ingestion
#[async_trait]
pub trait ItemStore: Send + Sync {
    async fn find_by_id(&self, item_id: i64) -> AppResult<Option<Item>>;

    /// Items newest first, optionally restricted to one feed
    async fn list(&self, feed_id: Option<i64>, page: PageRequest) -> AppResult<Page<Item>>;

    async fn delete(&self, item_id: i64) -> AppResult<bool>;

    async fn delete_all(&self) -> AppResult<u64>;

    async fn count(&self) -> AppResult<i64>;
}
