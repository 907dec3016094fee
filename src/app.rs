//! Wires repositories, services and controllers together.
use anyhow::Context;
use axum::Router;
use std::sync::Arc;

use crate::controllers::{feed::FeedController, item::ItemController, stats::StatsController};
use crate::domain::feed::{FeedService, TestSourceClassifier};
use crate::domain::ingestion::{FetchLog, IngestionOptions, IngestionService};
use crate::domain::item::ItemService;
use crate::domain::shared::SystemClock;
use crate::domain::stats::StatsService;
use crate::infrastructure::config::Config;
use crate::infrastructure::db::DbPool;
use crate::infrastructure::fetcher::ReqwestFeedFetcher;
use crate::infrastructure::http::build_router;
use crate::infrastructure::repositories::{FeedRepository, IngestionRepository, ItemRepository};

pub struct App {
    pub feed_service: Arc<FeedService>,
    pub ingestion: Arc<IngestionService>,
    pub router: Router,
}

pub fn build_app(config: Arc<Config>, pool: Arc<DbPool>) -> anyhow::Result<App> {
    // 1. Repositories
    let feed_repo = Arc::new(FeedRepository::new(pool.clone()));
    let item_repo = Arc::new(ItemRepository::new(pool.clone()));
    let ingestion_repo = Arc::new(IngestionRepository::new(pool.clone()));

    // 2. Outbound clients
    let fetcher = Arc::new(
        ReqwestFeedFetcher::new(
            &config.user_agent,
            config.fetch_timeout,
            config.fetch_max_bytes,
        )
            .context("failed to build HTTP client")?,
    );
    let classifier = TestSourceClassifier::new(&config.test_source_patterns)
        .context("invalid TEST_SOURCE_PATTERNS")?;
    let fetch_log = Arc::new(FetchLog::default());

    // 3. Services
    let feed_service = Arc::new(FeedService::new(feed_repo.clone(), classifier));
    let item_service = Arc::new(ItemService::new(item_repo.clone(), feed_repo.clone()));
    let stats_service = Arc::new(StatsService::new(feed_repo, item_repo));
    let ingestion = Arc::new(IngestionService::new(
        ingestion_repo,
        fetcher,
        Arc::new(SystemClock),
        fetch_log.clone(),
        IngestionOptions {
            feed_timeout: config.fetch_timeout,
            max_concurrent: config.fetch_concurrency,
        },
    ));

    // 4. Controllers
    let feed_controller = Arc::new(FeedController::new(
        feed_service.clone(),
        ingestion.clone(),
        config.default_feeds.clone(),
    ));
    let item_controller = Arc::new(ItemController::new(item_service, ingestion.clone()));
    let stats_controller = Arc::new(StatsController::new(stats_service, fetch_log));

    let router = build_router(
        pool,
        config,
        feed_controller,
        item_controller,
        stats_controller,
    );

    Ok(App {
        feed_service,
        ingestion,
        router,
    })
}
