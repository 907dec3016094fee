use async_trait::async_trait;
use chrono::{DateTime, Utc};
use feedhub_backend::domain::feed::{Feed, FeedStore};
use feedhub_backend::domain::ingestion::{IngestionStore, UpsertCounts};
use feedhub_backend::domain::item::{Item, ItemStore};
use feedhub_backend::domain::parser::ParsedFeed;
use feedhub_backend::domain::shared::{Page, PageRequest};
use feedhub_backend::error::{AppError, AppResult};
use parking_lot::Mutex;

#[derive(Default)]
struct Tables {
    feeds: Vec<Feed>,
    items: Vec<Item>,
    next_feed_id: i64,
    next_item_id: i64,
}

/// Store with the same uniqueness and commit rules as the Postgres repositories
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&self, feed_id: i64) -> Option<Feed> {
        self.tables
            .lock()
            .feeds
            .iter()
            .find(|f| f.id == feed_id)
            .cloned()
    }

    pub fn items_of(&self, feed_id: i64) -> Vec<Item> {
        self.tables
            .lock()
            .items
            .iter()
            .filter(|i| i.feed_id == feed_id)
            .cloned()
            .collect()
    }

    pub fn all_items(&self) -> Vec<Item> {
        self.tables.lock().items.clone()
    }
}

fn paginate<T: Clone>(rows: &[T], page: PageRequest) -> Page<T> {
    let items = rows
        .iter()
        .skip(page.offset() as usize)
        .take(page.limit() as usize)
        .cloned()
        .collect();
    Page::new(items, page, rows.len() as i64)
}

#[async_trait]
impl FeedStore for InMemoryStore {
    async fn create(&self, url: &str, is_test_source: bool) -> AppResult<Feed> {
        let mut tables = self.tables.lock();
        if tables.feeds.iter().any(|f| f.url == url) {
            return Err(AppError::Conflict("Feed URL already exists".to_string()));
        }

        tables.next_feed_id += 1;
        let feed = Feed {
            id: tables.next_feed_id,
            url: url.to_string(),
            title: None,
            description: None,
            is_test_source,
            created_at: Utc::now(),
            last_success_at: None,
            last_error: None,
            last_error_at: None,
        };
        tables.feeds.push(feed.clone());
        Ok(feed)
    }

    async fn find_by_id(&self, feed_id: i64) -> AppResult<Option<Feed>> {
        Ok(self.feed(feed_id))
    }

    async fn list(&self, page: PageRequest) -> AppResult<Page<Feed>> {
        let tables = self.tables.lock();
        let mut feeds = tables.feeds.clone();
        feeds.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(paginate(&feeds, page))
    }

    async fn delete(&self, feed_id: i64) -> AppResult<bool> {
        let mut tables = self.tables.lock();
        let before = tables.feeds.len();
        tables.feeds.retain(|f| f.id != feed_id);
        tables.items.retain(|i| i.feed_id != feed_id);
        Ok(tables.feeds.len() < before)
    }

    async fn delete_all(&self) -> AppResult<u64> {
        let mut tables = self.tables.lock();
        let deleted = tables.feeds.len() as u64;
        tables.feeds.clear();
        tables.items.clear();
        Ok(deleted)
    }

    async fn count(&self) -> AppResult<i64> {
        Ok(self.tables.lock().feeds.len() as i64)
    }

    async fn latest_success(&self) -> AppResult<Option<Feed>> {
        Ok(self
            .tables
            .lock()
            .feeds
            .iter()
            .filter(|f| f.last_success_at.is_some())
            .max_by_key(|f| f.last_success_at)
            .cloned())
    }

    async fn latest_error(&self) -> AppResult<Option<Feed>> {
        Ok(self
            .tables
            .lock()
            .feeds
            .iter()
            .filter(|f| f.last_error_at.is_some())
            .max_by_key(|f| f.last_error_at)
            .cloned())
    }
}

#[async_trait]
impl ItemStore for InMemoryStore {
    async fn find_by_id(&self, item_id: i64) -> AppResult<Option<Item>> {
        Ok(self
            .tables
            .lock()
            .items
            .iter()
            .find(|i| i.id == item_id)
            .cloned())
    }

    async fn list(&self, feed_id: Option<i64>, page: PageRequest) -> AppResult<Page<Item>> {
        let tables = self.tables.lock();
        let mut items: Vec<Item> = tables
            .items
            .iter()
            .filter(|i| feed_id.map_or(true, |id| i.feed_id == id))
            .cloned()
            .collect();
        items.sort_by(|a, b| b.published_at.cmp(&a.published_at).then(b.id.cmp(&a.id)));
        Ok(paginate(&items, page))
    }

    async fn delete(&self, item_id: i64) -> AppResult<bool> {
        let mut tables = self.tables.lock();
        let before = tables.items.len();
        tables.items.retain(|i| i.id != item_id);
        Ok(tables.items.len() < before)
    }

    async fn delete_all(&self) -> AppResult<u64> {
        let mut tables = self.tables.lock();
        let deleted = tables.items.len() as u64;
        tables.items.clear();
        Ok(deleted)
    }

    async fn count(&self) -> AppResult<i64> {
        Ok(self.tables.lock().items.len() as i64)
    }
}

#[async_trait]
impl IngestionStore for InMemoryStore {
    async fn find_feed(&self, feed_id: i64) -> AppResult<Option<Feed>> {
        Ok(self.feed(feed_id))
    }

    async fn feeds_for_ingestion(&self, exclude_test_sources: bool) -> AppResult<Vec<Feed>> {
        let tables = self.tables.lock();
        let mut feeds: Vec<Feed> = tables
            .feeds
            .iter()
            .filter(|f| !(exclude_test_sources && f.is_test_source))
            .cloned()
            .collect();
        feeds.sort_by_key(|f| f.id);
        Ok(feeds)
    }

    async fn record_failure(
        &self,
        feed_id: i64,
        message: &str,
        at: DateTime<Utc>,
    ) -> AppResult<()> {
        let mut tables = self.tables.lock();
        if let Some(feed) = tables.feeds.iter_mut().find(|f| f.id == feed_id) {
            feed.last_error = Some(message.to_string());
            feed.last_error_at = Some(at);
        }
        Ok(())
    }

    async fn commit_success(
        &self,
        feed_id: i64,
        parsed: &ParsedFeed,
        at: DateTime<Utc>,
    ) -> AppResult<UpsertCounts> {
        let mut guard = self.tables.lock();
        let tables = &mut *guard;

        let feed = tables
            .feeds
            .iter_mut()
            .find(|f| f.id == feed_id)
            .ok_or_else(|| AppError::NotFound("Feed not found".to_string()))?;

        if parsed.title.is_some() {
            feed.title = parsed.title.clone();
        }
        if parsed.description.is_some() {
            feed.description = parsed.description.clone();
        }
        feed.last_success_at = Some(feed.last_success_at.map_or(at, |prev| prev.max(at)));
        feed.last_error = None;
        feed.last_error_at = None;

        let mut counts = UpsertCounts::default();
        for parsed_item in parsed.items() {
            let existing = tables
                .items
                .iter_mut()
                .find(|i| i.feed_id == feed_id && i.guid == parsed_item.natural_key);

            match existing {
                Some(item) => {
                    item.title = parsed_item.title.clone();
                    item.link = parsed_item.link.clone();
                    item.description = parsed_item.description.clone();
                    item.content = parsed_item.content.clone();
                    item.author = parsed_item.author.clone();
                    item.published_at = parsed_item.published_at.or(item.published_at);
                    item.updated_at = at;
                    counts.updated += 1;
                }
                None => {
                    tables.next_item_id += 1;
                    tables.items.push(Item {
                        id: tables.next_item_id,
                        feed_id,
                        guid: parsed_item.natural_key.clone(),
                        title: parsed_item.title.clone(),
                        link: parsed_item.link.clone(),
                        description: parsed_item.description.clone(),
                        content: parsed_item.content.clone(),
                        author: parsed_item.author.clone(),
                        published_at: parsed_item.published_at,
                        created_at: at,
                        updated_at: at,
                    });
                    counts.created += 1;
                }
            }
        }

        Ok(counts)
    }
}
