use axum::{extract::State, Json};
use std::sync::Arc;

use crate::domain::ingestion::{FetchLog, FetchLogEntry};
use crate::domain::stats::{StatsResponse, StatsServiceApi};
use crate::error::AppResult;

pub struct StatsController {
    stats_service: Arc<dyn StatsServiceApi>,
    fetch_log: Arc<FetchLog>,
}

impl StatsController {
    pub fn new(stats_service: Arc<dyn StatsServiceApi>, fetch_log: Arc<FetchLog>) -> Self {
        Self {
            stats_service,
            fetch_log,
        }
    }

    /// GET /api/stats
    pub async fn stats(
        State(controller): State<Arc<StatsController>>,
    ) -> AppResult<Json<StatsResponse>> {
        let stats = controller.stats_service.stats().await?;
        Ok(Json(StatsResponse::from(stats)))
    }

    /// GET /api/logs - Recent ingestion outcomes, newest first
    pub async fn logs(State(controller): State<Arc<StatsController>>) -> Json<Vec<FetchLogEntry>> {
        Json(controller.fetch_log.entries())
    }
}
