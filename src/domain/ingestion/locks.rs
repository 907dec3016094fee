use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Lock table keyed by feed id. Holding the guard means owning the feed's
/// ingestion; different feeds never contend.
#[derive(Debug, Default, Clone)]
pub struct FeedLocks {
    inner: Arc<Mutex<HashMap<i64, Arc<AsyncMutex<()>>>>>,
}

pub type FeedGuard = OwnedMutexGuard<()>;

impl FeedLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits until the feed is free
    pub async fn lock(&self, feed_id: i64) -> FeedGuard {
        self.entry(feed_id).lock_owned().await
    }

    /// Returns `None` when the feed is already being ingested
    pub fn try_lock(&self, feed_id: i64) -> Option<FeedGuard> {
        self.entry(feed_id).try_lock_owned().ok()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entry(&self, feed_id: i64) -> Arc<AsyncMutex<()>> {
        let mut table = self.inner.lock();
        // entries only referenced by the table are idle
        table.retain(|id, lock| *id == feed_id || Arc::strong_count(lock) > 1);
        table
            .entry(feed_id)
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }
}
