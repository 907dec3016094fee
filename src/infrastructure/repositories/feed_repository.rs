use crate::domain::feed::{Feed, FeedStore};
use crate::domain::shared::{Page, PageRequest};
use crate::error::{AppError, AppResult};
use crate::infrastructure::db::DbPool;
use async_trait::async_trait;
use std::sync::Arc;

pub(crate) const FEED_COLUMNS: &str = "id, url, title, description, is_test_source, created_at, \
     last_success_at, last_error, last_error_at";

pub struct FeedRepository {
    pool: Arc<DbPool>,
}

impl FeedRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FeedStore for FeedRepository {
    async fn create(&self, url: &str, is_test_source: bool) -> AppResult<Feed> {
        let pool = self.pool.as_ref();
        let feed = sqlx::query_as::<_, Feed>(&format!(
            r#"
            INSERT INTO feeds (url, is_test_source)
            VALUES ($1, $2)
            RETURNING {FEED_COLUMNS}
            "#
        ))
        .bind(url)
        .bind(is_test_source)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e {
                if db_err.is_unique_violation() {
                    return AppError::Conflict("Feed URL already exists".to_string());
                }
            }
            AppError::Database(e)
        })?;

        Ok(feed)
    }

    async fn find_by_id(&self, feed_id: i64) -> AppResult<Option<Feed>> {
        let pool = self.pool.as_ref();
        let feed = sqlx::query_as::<_, Feed>(&format!(
            "SELECT {FEED_COLUMNS} FROM feeds WHERE id = $1"
        ))
        .bind(feed_id)
        .fetch_optional(pool)
        .await?;

        Ok(feed)
    }

    async fn list(&self, page: PageRequest) -> AppResult<Page<Feed>> {
        let pool = self.pool.as_ref();
        let feeds = sqlx::query_as::<_, Feed>(&format!(
            r#"
            SELECT {FEED_COLUMNS}
            FROM feeds
            ORDER BY created_at DESC, id DESC
            LIMIT $1 OFFSET $2
            "#
        ))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(pool)
        .await?;

        let total = self.count().await?;
        Ok(Page::new(feeds, page, total))
    }

    async fn delete(&self, feed_id: i64) -> AppResult<bool> {
        let pool = self.pool.as_ref();
        // items go with the feed through ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM feeds WHERE id = $1")
            .bind(feed_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_all(&self) -> AppResult<u64> {
        let pool = self.pool.as_ref();
        let result = sqlx::query("DELETE FROM feeds").execute(pool).await?;

        Ok(result.rows_affected())
    }

    async fn count(&self) -> AppResult<i64> {
        let pool = self.pool.as_ref();
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM feeds")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }

    async fn latest_success(&self) -> AppResult<Option<Feed>> {
        let pool = self.pool.as_ref();
        let feed = sqlx::query_as::<_, Feed>(&format!(
            r#"
            SELECT {FEED_COLUMNS}
            FROM feeds
            WHERE last_success_at IS NOT NULL
            ORDER BY last_success_at DESC
            LIMIT 1
            "#
        ))
        .fetch_optional(pool)
        .await?;

        Ok(feed)
    }

    async fn latest_error(&self) -> AppResult<Option<Feed>> {
        let pool = self.pool.as_ref();
        let feed = sqlx::query_as::<_, Feed>(&format!(
            r#"
            SELECT {FEED_COLUMNS}
            FROM feeds
            WHERE last_error_at IS NOT NULL
            ORDER BY last_error_at DESC
            LIMIT 1
            "#
        ))
        .fetch_optional(pool)
        .await?;

        Ok(feed)
    }
}
