use axum::{
    extract::Request,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::Span;

use crate::controllers::{
    feed::FeedController, health, item::ItemController, stats::StatsController,
};
use crate::infrastructure::auth::{admin_auth_middleware, request_id_middleware, RequestId};
use crate::infrastructure::config::Config;
use crate::infrastructure::db::DbPool;

/// Build the application router with all routes and layers
pub fn build_router(
    pool: Arc<DbPool>,
    config: Arc<Config>,
    feed_controller: Arc<FeedController>,
    item_controller: Arc<ItemController>,
    stats_controller: Arc<StatsController>,
) -> Router {
    let feed_routes = Router::new()
        .route(
            "/api/feeds",
            get(FeedController::list_feeds)
                .post(FeedController::create_feed)
                .delete(FeedController::delete_all_feeds),
        )
        .route("/api/feeds/seed", post(FeedController::seed_feeds))
        .route(
            "/api/feeds/:feedId",
            get(FeedController::get_feed).delete(FeedController::delete_feed),
        )
        .route("/api/feeds/:feedId/fetch", post(FeedController::fetch_feed))
        .with_state(feed_controller);

    let item_routes = Router::new()
        .route(
            "/api/items",
            get(ItemController::list_items).delete(ItemController::delete_all_items),
        )
        .route("/api/items/fetch", post(ItemController::fetch_all))
        .route(
            "/api/items/:itemId",
            get(ItemController::get_item).delete(ItemController::delete_item),
        )
        .with_state(item_controller);

    let stats_routes = Router::new()
        .route("/api/stats", get(StatsController::stats))
        .route("/api/logs", get(StatsController::logs))
        .with_state(stats_controller);

    // Admin API (bearer token when ADMIN_TOKEN is set)
    let api_routes = Router::new()
        .merge(feed_routes)
        .merge(item_routes)
        .merge(stats_routes)
        .layer(middleware::from_fn_with_state(
            config.clone(),
            admin_auth_middleware,
        ));

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(pool)
        .merge(api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(request_span))
                .layer(TimeoutLayer::new(config.request_timeout)),
        )
}

/// Span for one HTTP request, tagged with the id set by `request_id_middleware`
fn request_span(request: &Request) -> Span {
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|id| id.0.as_str())
        .unwrap_or("-");

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id,
    )
}

/// Serve the router until ctrl-c
pub async fn start_http_server(
    config: Arc<Config>,
    app: Router,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
