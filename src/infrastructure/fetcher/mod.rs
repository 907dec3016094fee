use crate::domain::ingestion::{FeedFetcher, FetchError, FetchedDocument};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;

pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Feed fetcher backed by a shared reqwest client
pub struct ReqwestFeedFetcher {
    client: reqwest::Client,
    max_body_bytes: usize,
}

impl ReqwestFeedFetcher {
    pub fn new(
        user_agent: &str,
        timeout: Duration,
        max_body_bytes: usize,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()?;
        Ok(Self {
            client,
            max_body_bytes,
        })
    }

    fn classify_error(e: &reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::network(format!("request timed out ({e})"))
        } else if e.is_connect() {
            FetchError::network(format!("connection failed ({e})"))
        } else {
            FetchError::network(e.to_string())
        }
    }

    fn status_error(status: StatusCode) -> Option<FetchError> {
        if status.as_u16() >= 400 {
            Some(FetchError::http_status(
                status.as_u16(),
                status.canonical_reason(),
            ))
        } else {
            None
        }
    }
}

#[async_trait]
impl FeedFetcher for ReqwestFeedFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedDocument, FetchError> {
        tracing::debug!(url, "Fetching feed");

        let mut response = self.client.get(url).send().await.map_err(|e| {
            tracing::debug!(url, error = %e, "Feed request failed");
            Self::classify_error(&e)
        })?;

        if let Some(err) = Self::status_error(response.status()) {
            return Err(err);
        }

        let limit = self.max_body_bytes;
        if response.content_length().is_some_and(|len| len > limit as u64) {
            return Err(FetchError::TooLarge { limit });
        }

        // Content-Length may be absent or wrong, so the limit is enforced while streaming
        let mut body = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| Self::classify_error(&e))?
        {
            if body.len() + chunk.len() > limit {
                tracing::debug!(url, limit, "Feed body over the size limit");
                return Err(FetchError::TooLarge { limit });
            }
            body.extend_from_slice(&chunk);
        }

        Ok(FetchedDocument { body })
    }
}
