use crate::domain::item::{Item, ItemStore};
use crate::domain::shared::{Page, PageRequest};
use crate::error::AppResult;
use crate::infrastructure::db::DbPool;
use async_trait::async_trait;
use std::sync::Arc;

pub struct ItemRepository {
    pool: Arc<DbPool>,
}

impl ItemRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemStore for ItemRepository {
    async fn find_by_id(&self, item_id: i64) -> AppResult<Option<Item>> {
        let pool = self.pool.as_ref();
        let item = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, feed_id, guid, title, link, description, content, author,
                   published_at, created_at, updated_at
            FROM items
            WHERE id = $1
            "#,
        )
        .bind(item_id)
        .fetch_optional(pool)
        .await?;

        Ok(item)
    }

    async fn list(&self, feed_id: Option<i64>, page: PageRequest) -> AppResult<Page<Item>> {
        let pool = self.pool.as_ref();
        // NULL feed filter lists every feed's items
        let items = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, feed_id, guid, title, link, description, content, author,
                   published_at, created_at, updated_at
            FROM items
            WHERE ($1::BIGINT IS NULL OR feed_id = $1)
            ORDER BY published_at DESC NULLS LAST, id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(feed_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM items WHERE ($1::BIGINT IS NULL OR feed_id = $1)",
        )
        .bind(feed_id)
        .fetch_one(pool)
        .await?;

        Ok(Page::new(items, page, total))
    }

    async fn delete(&self, item_id: i64) -> AppResult<bool> {
        let pool = self.pool.as_ref();
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(item_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_all(&self) -> AppResult<u64> {
        let pool = self.pool.as_ref();
        let result = sqlx::query("DELETE FROM items").execute(pool).await?;

        Ok(result.rows_affected())
    }

    async fn count(&self) -> AppResult<i64> {
        let pool = self.pool.as_ref();
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM items")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}
