use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

pub const DEFAULT_FETCH_LOG_CAPACITY: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchLogKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchLogEntry {
    pub timestamp: DateTime<Utc>,
    pub kind: FetchLogKind,
    pub feed_url: String,
    pub message: String,
}

/// Bounded in-memory history of ingestion outcomes; the oldest entries are evicted first
#[derive(Debug)]
pub struct FetchLog {
    entries: RwLock<VecDeque<FetchLogEntry>>,
    capacity: usize,
}

impl FetchLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(VecDeque::with_capacity(capacity.min(64))),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&self, entry: FetchLogEntry) {
        let mut entries = self.entries.write();
        while entries.len() >= self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    pub fn success(&self, timestamp: DateTime<Utc>, feed_url: &str, message: String) {
        self.push(FetchLogEntry {
            timestamp,
            kind: FetchLogKind::Success,
            feed_url: feed_url.to_string(),
            message,
        });
    }

    pub fn error(&self, timestamp: DateTime<Utc>, feed_url: &str, message: String) {
        self.push(FetchLogEntry {
            timestamp,
            kind: FetchLogKind::Error,
            feed_url: feed_url.to_string(),
            message,
        });
    }

    /// Newest first
    pub fn entries(&self) -> Vec<FetchLogEntry> {
        self.entries.read().iter().rev().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for FetchLog {
    fn default() -> Self {
        Self::new(DEFAULT_FETCH_LOG_CAPACITY)
    }
}
