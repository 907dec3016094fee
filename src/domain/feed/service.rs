use super::error::FeedServiceError;
use super::{FeedResponse, FeedStore, SeedFeedsResult, TestSourceClassifier};
use crate::domain::shared::{Page, PageRequest};
use async_trait::async_trait;
use reqwest::Url;
use std::sync::Arc;

pub const DEFAULT_FEEDS: &[&str] = &[
    "https://feeds.bbci.co.uk/news/rss.xml",
    "http://rss.cnn.com/rss/cnn_topstories.rss",
    "https://www.wired.com/feed/rss",
    "https://habr.com/ru/rss/articles/?fl=ru",
];

pub struct FeedService {
    feed_store: Arc<dyn FeedStore>,
    classifier: TestSourceClassifier,
}

impl FeedService {
    pub fn new(feed_store: Arc<dyn FeedStore>, classifier: TestSourceClassifier) -> Self {
        Self {
            feed_store,
            classifier,
        }
    }
}

#[async_trait]
pub trait FeedServiceApi: Send + Sync {
    async fn list_feeds(&self, page: PageRequest)
        -> Result<Page<FeedResponse>, FeedServiceError>;

    async fn get_feed(&self, feed_id: i64) -> Result<FeedResponse, FeedServiceError>;

    async fn create_feed(&self, url: &str) -> Result<FeedResponse, FeedServiceError>;

    async fn delete_feed(&self, feed_id: i64) -> Result<(), FeedServiceError>;

    async fn delete_all_feeds(&self) -> Result<u64, FeedServiceError>;

    /// Registers every URL that is not known yet; individual failures are counted, not returned
    async fn seed_feeds(&self, urls: &[String]) -> Result<SeedFeedsResult, FeedServiceError>;
}

#[async_trait]
impl FeedServiceApi for FeedService {
    async fn list_feeds(
        &self,
        page: PageRequest,
    ) -> Result<Page<FeedResponse>, FeedServiceError> {
        let feeds = self.feed_store.list(page).await?;
        Ok(feeds.map(FeedResponse::from))
    }

    async fn get_feed(&self, feed_id: i64) -> Result<FeedResponse, FeedServiceError> {
        self.feed_store
            .find_by_id(feed_id)
            .await?
            .map(FeedResponse::from)
            .ok_or(FeedServiceError::NotFound)
    }

    async fn create_feed(&self, url: &str) -> Result<FeedResponse, FeedServiceError> {
        let url = validate_url(url)?;
        let is_test_source = self.classifier.is_test_source(&url);

        let feed = self.feed_store.create(&url, is_test_source).await?;

        tracing::info!(
            feed_id = feed.id,
            url = %feed.url,
            is_test_source,
            "Feed registered"
        );

        Ok(FeedResponse::from(feed))
    }

    async fn delete_feed(&self, feed_id: i64) -> Result<(), FeedServiceError> {
        if !self.feed_store.delete(feed_id).await? {
            return Err(FeedServiceError::NotFound);
        }

        tracing::info!(feed_id, "Feed deleted");
        Ok(())
    }

    async fn delete_all_feeds(&self) -> Result<u64, FeedServiceError> {
        let deleted = self.feed_store.delete_all().await?;
        tracing::info!(deleted, "All feeds deleted");
        Ok(deleted)
    }

    async fn seed_feeds(&self, urls: &[String]) -> Result<SeedFeedsResult, FeedServiceError> {
        let mut result = SeedFeedsResult::default();

        for url in urls {
            match self.create_feed(url).await {
                Ok(_) => result.created += 1,
                Err(FeedServiceError::DuplicateUrl) => result.existed += 1,
                Err(e) => {
                    tracing::warn!(url = %url, error = %e, "Failed to seed feed");
                    result.errors += 1;
                }
            }
        }

        tracing::info!(
            created = result.created,
            existed = result.existed,
            errors = result.errors,
            "Default feeds seeded"
        );

        Ok(result)
    }
}

/// Trims the URL and checks it is an absolute http(s) URL with a host
pub fn validate_url(url: &str) -> Result<String, FeedServiceError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(FeedServiceError::Invalid("URL is required".to_string()));
    }

    let parsed = Url::parse(url)
        .map_err(|_| FeedServiceError::Invalid("Invalid URL format".to_string()))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(FeedServiceError::Invalid(
            "URL must use http or https".to_string(),
        ));
    }

    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(FeedServiceError::Invalid("URL must have a host".to_string()));
    }

    Ok(url.to_string())
}
