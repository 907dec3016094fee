use super::feed_repository::FEED_COLUMNS;
use crate::domain::feed::Feed;
use crate::domain::ingestion::{IngestionStore, UpsertCounts};
use crate::domain::parser::ParsedFeed;
use crate::error::{AppError, AppResult};
use crate::infrastructure::db::DbPool;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

pub struct IngestionRepository {
    pool: Arc<DbPool>,
}

impl IngestionRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IngestionStore for IngestionRepository {
    async fn find_feed(&self, feed_id: i64) -> AppResult<Option<Feed>> {
        let pool = self.pool.as_ref();
        let feed = sqlx::query_as::<_, Feed>(&format!(
            "SELECT {FEED_COLUMNS} FROM feeds WHERE id = $1"
        ))
        .bind(feed_id)
        .fetch_optional(pool)
        .await?;

        Ok(feed)
    }

    async fn feeds_for_ingestion(&self, exclude_test_sources: bool) -> AppResult<Vec<Feed>> {
        let pool = self.pool.as_ref();
        let feeds = sqlx::query_as::<_, Feed>(&format!(
            r#"
            SELECT {FEED_COLUMNS}
            FROM feeds
            WHERE NOT ($1 AND is_test_source)
            ORDER BY id
            "#
        ))
        .bind(exclude_test_sources)
        .fetch_all(pool)
        .await?;

        Ok(feeds)
    }

    async fn record_failure(
        &self,
        feed_id: i64,
        message: &str,
        at: DateTime<Utc>,
    ) -> AppResult<()> {
        let pool = self.pool.as_ref();
        sqlx::query(
            r#"
            UPDATE feeds
            SET last_error = $2, last_error_at = $3, updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(feed_id)
        .bind(message)
        .bind(at)
        .execute(pool)
        .await?;

        Ok(())
    }

    async fn commit_success(
        &self,
        feed_id: i64,
        parsed: &ParsedFeed,
        at: DateTime<Utc>,
    ) -> AppResult<UpsertCounts> {
        let mut tx = self.pool.begin().await?;

        // the row lock taken here also serializes concurrent commits for the feed
        let updated_feed = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE feeds
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                last_success_at = GREATEST(last_success_at, $4),
                last_error = NULL,
                last_error_at = NULL,
                updated_at = $4
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(feed_id)
        .bind(parsed.title.as_deref())
        .bind(parsed.description.as_deref())
        .bind(at)
        .fetch_optional(&mut *tx)
        .await?;

        if updated_feed.is_none() {
            return Err(AppError::NotFound("Feed not found".to_string()));
        }

        let mut counts = UpsertCounts::default();
        for item in parsed.items() {
            // xmax is 0 only for freshly inserted rows
            let inserted = sqlx::query_scalar::<_, bool>(
                r#"
                INSERT INTO items (feed_id, guid, title, link, description, content, author,
                                   published_at, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)
                ON CONFLICT (feed_id, guid) DO UPDATE
                SET title = EXCLUDED.title,
                    link = EXCLUDED.link,
                    description = EXCLUDED.description,
                    content = EXCLUDED.content,
                    author = EXCLUDED.author,
                    published_at = COALESCE(EXCLUDED.published_at, items.published_at),
                    updated_at = EXCLUDED.updated_at
                RETURNING (xmax = 0) AS inserted
                "#,
            )
            .bind(feed_id)
            .bind(&item.natural_key)
            .bind(&item.title)
            .bind(&item.link)
            .bind(item.description.as_deref())
            .bind(item.content.as_deref())
            .bind(item.author.as_deref())
            .bind(item.published_at)
            .bind(at)
            .fetch_one(&mut *tx)
            .await?;

            if inserted {
                counts.created += 1;
            } else {
                counts.updated += 1;
            }
        }

        tx.commit().await?;

        Ok(counts)
    }
}
