pub mod service;

pub use service::{StatsService, StatsServiceApi};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastSuccess {
    pub at: DateTime<Utc>,
    pub feed_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastError {
    pub at: DateTime<Utc>,
    pub feed_url: String,
    pub message: String,
}

/// Dashboard counters. A missing timestamp renders as "Never".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub feeds_count: i64,
    pub items_count: i64,
    pub last_success: Option<LastSuccess>,
    pub last_error: Option<LastError>,
}

impl Stats {
    pub fn last_success_display(&self) -> String {
        self.last_success
            .as_ref()
            .map(|s| s.at.to_rfc3339())
            .unwrap_or_else(|| "Never".to_string())
    }

    pub fn last_error_display(&self) -> String {
        self.last_error
            .as_ref()
            .map(|e| e.at.to_rfc3339())
            .unwrap_or_else(|| "Never".to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    pub feeds_count: i64,
    pub items_count: i64,
    pub last_success: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_success_feed: Option<String>,
    pub last_error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error_feed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error_message: Option<String>,
}

impl From<Stats> for StatsResponse {
    fn from(stats: Stats) -> Self {
        Self {
            feeds_count: stats.feeds_count,
            items_count: stats.items_count,
            last_success: stats.last_success_display(),
            last_error: stats.last_error_display(),
            last_success_feed: stats.last_success.map(|s| s.feed_url),
            last_error_feed: stats.last_error.as_ref().map(|e| e.feed_url.clone()),
            last_error_message: stats.last_error.map(|e| e.message),
        }
    }
}
