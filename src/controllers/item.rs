use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::domain::feed::DeletedResponse;
use crate::domain::ingestion::{IngestSummaryResponse, IngestionServiceApi};
use crate::domain::item::{ItemListQuery, ItemResponse, ItemServiceApi};
use crate::domain::shared::Page;
use crate::error::AppResult;

pub struct ItemController {
    item_service: Arc<dyn ItemServiceApi>,
    ingestion: Arc<dyn IngestionServiceApi>,
}

impl ItemController {
    pub fn new(
        item_service: Arc<dyn ItemServiceApi>,
        ingestion: Arc<dyn IngestionServiceApi>,
    ) -> Self {
        Self {
            item_service,
            ingestion,
        }
    }

    /// GET /api/items - List items, optionally for one feed
    pub async fn list_items(
        State(controller): State<Arc<ItemController>>,
        Query(query): Query<ItemListQuery>,
    ) -> AppResult<Json<Page<ItemResponse>>> {
        let items = controller
            .item_service
            .list_items(query.feed_id, query.page_request())
            .await?;
        Ok(Json(items))
    }

    /// GET /api/items/{itemId}
    pub async fn get_item(
        State(controller): State<Arc<ItemController>>,
        Path(item_id): Path<i64>,
    ) -> AppResult<Json<ItemResponse>> {
        let item = controller.item_service.get_item(item_id).await?;
        Ok(Json(item))
    }

    /// DELETE /api/items/{itemId}
    pub async fn delete_item(
        State(controller): State<Arc<ItemController>>,
        Path(item_id): Path<i64>,
    ) -> AppResult<StatusCode> {
        controller.item_service.delete_item(item_id).await?;
        Ok(StatusCode::NO_CONTENT)
    }

    /// DELETE /api/items
    pub async fn delete_all_items(
        State(controller): State<Arc<ItemController>>,
    ) -> AppResult<Json<DeletedResponse>> {
        let deleted = controller.item_service.delete_all_items().await?;
        Ok(Json(DeletedResponse { deleted }))
    }

    /// POST /api/items/fetch - Ingest every feed, test sources included
    pub async fn fetch_all(
        State(controller): State<Arc<ItemController>>,
    ) -> AppResult<Json<IngestSummaryResponse>> {
        let summary = controller.ingestion.ingest_all(false).await?;
        Ok(Json(IngestSummaryResponse::from(summary)))
    }
}
