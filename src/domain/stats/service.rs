use super::{LastError, LastSuccess, Stats};
use crate::domain::feed::FeedStore;
use crate::domain::item::ItemStore;
use crate::error::AppResult;
use async_trait::async_trait;
use std::sync::Arc;

pub struct StatsService {
    feed_store: Arc<dyn FeedStore>,
    item_store: Arc<dyn ItemStore>,
}

impl StatsService {
    pub fn new(feed_store: Arc<dyn FeedStore>, item_store: Arc<dyn ItemStore>) -> Self {
        Self {
            feed_store,
            item_store,
        }
    }
}

#[async_trait]
pub trait StatsServiceApi: Send + Sync {
    async fn stats(&self) -> AppResult<Stats>;
}

#[async_trait]
impl StatsServiceApi for StatsService {
    async fn stats(&self) -> AppResult<Stats> {
        let feeds_count = self.feed_store.count().await?;
        let items_count = self.item_store.count().await?;

        let last_success = self.feed_store.latest_success().await?.and_then(|feed| {
            feed.last_success_at.map(|at| LastSuccess {
                at,
                feed_url: feed.url,
            })
        });

        let last_error = self.feed_store.latest_error().await?.and_then(|feed| {
            match (feed.last_error_at, feed.last_error) {
                (Some(at), Some(message)) => Some(LastError {
                    at,
                    feed_url: feed.url,
                    message,
                }),
                _ => None,
            }
        });

        Ok(Stats {
            feeds_count,
            items_count,
            last_success,
            last_error,
        })
    }
}
