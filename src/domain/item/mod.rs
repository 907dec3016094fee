pub mod error;
pub mod model;
pub mod service;
pub mod store;

pub use error::ItemServiceError;
pub use model::Item;
pub use service::{ItemService, ItemServiceApi};
pub use store::ItemStore;

use crate::domain::shared::{PageQuery, PageRequest};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemResponse {
    pub id: i64,
    pub feed_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feed_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feed_url: Option<String>,
    pub guid: String,
    pub title: String,
    pub link: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Query string for item listings
#[derive(Debug, Default, Deserialize)]
pub struct ItemListQuery {
    pub feed_id: Option<i64>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ItemListQuery {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::from(PageQuery {
            page: self.page,
            per_page: self.per_page,
        })
    }
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            feed_id: item.feed_id,
            feed_title: None,
            feed_url: None,
            guid: item.guid,
            title: item.title,
            link: item.link,
            description: item.description,
            content: item.content,
            author: item.author,
            published_at: item.published_at,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}
