pub mod classifier;
pub mod error;
pub mod model;
pub mod service;
pub mod store;

pub use classifier::TestSourceClassifier;
pub use error::FeedServiceError;
pub use model::Feed;
pub use service::{FeedService, FeedServiceApi, DEFAULT_FEEDS};
pub use store::FeedStore;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Response for feed endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedResponse {
    pub id: i64,
    pub url: String,
    /// `None` until a fetch discovers the document title
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_test_source: bool,
    pub created_at: DateTime<Utc>,
    pub last_success_at: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
    pub last_error_at: Option<DateTime<Utc>>,
}

/// Request to register a new feed
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateFeedRequest {
    pub url: String,
}

/// Outcome of registering the default feed list
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedFeedsResult {
    pub created: usize,
    pub existed: usize,
    pub errors: usize,
}

/// Count of removed rows for bulk deletes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub deleted: u64,
}

impl From<Feed> for FeedResponse {
    fn from(feed: Feed) -> Self {
        Self {
            id: feed.id,
            title: feed.title,
            url: feed.url,
            description: feed.description,
            is_test_source: feed.is_test_source,
            created_at: feed.created_at,
            last_success_at: feed.last_success_at,
            last_error: feed.last_error,
            last_error_at: feed.last_error_at,
        }
    }
}
