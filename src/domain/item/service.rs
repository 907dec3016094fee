use super::error::ItemServiceError;
use super::{ItemResponse, ItemStore};
use crate::domain::feed::FeedStore;
use crate::domain::shared::{Page, PageRequest};
use async_trait::async_trait;
use std::sync::Arc;

pub struct ItemService {
    item_store: Arc<dyn ItemStore>,
    feed_store: Arc<dyn FeedStore>,
}

impl ItemService {
    pub fn new(item_store: Arc<dyn ItemStore>, feed_store: Arc<dyn FeedStore>) -> Self {
        Self {
            item_store,
            feed_store,
        }
    }
}

#[async_trait]
pub trait ItemServiceApi: Send + Sync {
    async fn list_items(
        &self,
        feed_id: Option<i64>,
        page: PageRequest,
    ) -> Result<Page<ItemResponse>, ItemServiceError>;

    async fn get_item(&self, item_id: i64) -> Result<ItemResponse, ItemServiceError>;

    async fn delete_item(&self, item_id: i64) -> Result<(), ItemServiceError>;

    async fn delete_all_items(&self) -> Result<u64, ItemServiceError>;
}

#[async_trait]
impl ItemServiceApi for ItemService {
    async fn list_items(
        &self,
        feed_id: Option<i64>,
        page: PageRequest,
    ) -> Result<Page<ItemResponse>, ItemServiceError> {
        let items = self.item_store.list(feed_id, page).await?;
        Ok(items.map(ItemResponse::from))
    }

    async fn get_item(&self, item_id: i64) -> Result<ItemResponse, ItemServiceError> {
        let item = self
            .item_store
            .find_by_id(item_id)
            .await?
            .ok_or(ItemServiceError::NotFound)?;

        let feed = self.feed_store.find_by_id(item.feed_id).await?;

        let mut response = ItemResponse::from(item);
        if let Some(feed) = feed {
            response.feed_title = feed.title;
            response.feed_url = Some(feed.url);
        }
        Ok(response)
    }

    async fn delete_item(&self, item_id: i64) -> Result<(), ItemServiceError> {
        if !self.item_store.delete(item_id).await? {
            return Err(ItemServiceError::NotFound);
        }

        tracing::info!(item_id, "Item deleted");
        Ok(())
    }

    async fn delete_all_items(&self) -> Result<u64, ItemServiceError> {
        let deleted = self.item_store.delete_all().await?;
        tracing::info!(deleted, "All items deleted");
        Ok(deleted)
    }
}
