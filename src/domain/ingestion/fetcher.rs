use async_trait::async_trait;

/// Raw response body
#[derive(Debug, Clone)]
pub struct FetchedDocument {
    pub body: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// DNS, connection refused, TLS, timeouts and body read failures
    #[error("network error: {detail}")]
    Network { detail: String },

    #[error("HTTP {status} {detail}")]
    HttpStatus { status: u16, detail: String },

    #[error("response body exceeds {limit} bytes")]
    TooLarge { limit: usize },
}

impl FetchError {
    pub fn network(detail: impl Into<String>) -> Self {
        Self::Network {
            detail: detail.into(),
        }
    }

    /// `detail` is the canonical reason phrase when the status has one
    pub fn http_status(status: u16, reason: Option<&str>) -> Self {
        Self::HttpStatus {
            status,
            detail: reason.unwrap_or("Unknown Status").to_string(),
        }
    }
}

/// Retrieves feed documents over the network. One attempt per call, no retries.
#[async_trait]
pub trait FeedFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedDocument, FetchError>;
}
