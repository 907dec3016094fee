use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::feed::{
    CreateFeedRequest, DeletedResponse, FeedResponse, FeedServiceApi, SeedFeedsResult,
};
use crate::domain::ingestion::IngestionServiceApi;
use crate::domain::shared::{Page, PageQuery, PageRequest};
use crate::error::AppResult;

/// Response for an on-demand fetch of one feed
#[derive(Debug, Serialize, Deserialize)]
pub struct FetchFeedResponse {
    pub feed_id: i64,
    pub created: u64,
    pub updated: u64,
    pub message: String,
}

pub struct FeedController {
    feed_service: Arc<dyn FeedServiceApi>,
    ingestion: Arc<dyn IngestionServiceApi>,
    default_feeds: Vec<String>,
}

impl FeedController {
    pub fn new(
        feed_service: Arc<dyn FeedServiceApi>,
        ingestion: Arc<dyn IngestionServiceApi>,
        default_feeds: Vec<String>,
    ) -> Self {
        Self {
            feed_service,
            ingestion,
            default_feeds,
        }
    }

    /// GET /api/feeds - List feeds, newest first
    pub async fn list_feeds(
        State(controller): State<Arc<FeedController>>,
        Query(query): Query<PageQuery>,
    ) -> AppResult<Json<Page<FeedResponse>>> {
        let feeds = controller
            .feed_service
            .list_feeds(PageRequest::from(query))
            .await?;
        Ok(Json(feeds))
    }

    /// POST /api/feeds - Register a feed
    pub async fn create_feed(
        State(controller): State<Arc<FeedController>>,
        Json(request): Json<CreateFeedRequest>,
    ) -> AppResult<(StatusCode, Json<FeedResponse>)> {
        let feed = controller.feed_service.create_feed(&request.url).await?;
        Ok((StatusCode::CREATED, Json(feed)))
    }

    /// GET /api/feeds/{feedId}
    pub async fn get_feed(
        State(controller): State<Arc<FeedController>>,
        Path(feed_id): Path<i64>,
    ) -> AppResult<Json<FeedResponse>> {
        let feed = controller.feed_service.get_feed(feed_id).await?;
        Ok(Json(feed))
    }

    /// DELETE /api/feeds/{feedId} - Delete feed and its items
    pub async fn delete_feed(
        State(controller): State<Arc<FeedController>>,
        Path(feed_id): Path<i64>,
    ) -> AppResult<StatusCode> {
        controller.feed_service.delete_feed(feed_id).await?;
        Ok(StatusCode::NO_CONTENT)
    }

    /// DELETE /api/feeds
    pub async fn delete_all_feeds(
        State(controller): State<Arc<FeedController>>,
    ) -> AppResult<Json<DeletedResponse>> {
        let deleted = controller.feed_service.delete_all_feeds().await?;
        Ok(Json(DeletedResponse { deleted }))
    }

    /// POST /api/feeds/seed - Register the default feed list
    pub async fn seed_feeds(
        State(controller): State<Arc<FeedController>>,
    ) -> AppResult<Json<SeedFeedsResult>> {
        let result = controller
            .feed_service
            .seed_feeds(&controller.default_feeds)
            .await?;
        Ok(Json(result))
    }

    /// POST /api/feeds/{feedId}/fetch - Ingest one feed now
    pub async fn fetch_feed(
        State(controller): State<Arc<FeedController>>,
        Path(feed_id): Path<i64>,
    ) -> AppResult<Json<FetchFeedResponse>> {
        let result = controller.ingestion.ingest_feed(feed_id).await?;
        Ok(Json(FetchFeedResponse {
            feed_id,
            created: result.created,
            updated: result.updated,
            message: format!(
                "Fetched items: {} created, {} updated",
                result.created, result.updated
            ),
        }))
    }
}
