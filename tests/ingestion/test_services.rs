use crate::common::{FeedServer, Harness};
use feedhub_backend::domain::feed::{FeedServiceApi, FeedServiceError, DEFAULT_FEEDS};
use feedhub_backend::domain::feed::FeedStore;
use feedhub_backend::domain::ingestion::IngestionServiceApi;
use feedhub_backend::domain::item::{ItemServiceApi, ItemServiceError};
use feedhub_backend::domain::shared::PageRequest;
use feedhub_backend::domain::stats::{StatsResponse, StatsServiceApi};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn test_duplicate_url_is_rejected() {
    let h = Harness::new();
    let url = "https://example.com/feed.xml";

    h.feeds.create_feed(url).await.unwrap();
    let err = h.feeds.create_feed(url).await.unwrap_err();

    assert!(matches!(err, FeedServiceError::DuplicateUrl));
    assert_eq!(FeedStore::count(h.store.as_ref()).await.unwrap(), 1);
}

#[tokio::test]
async fn test_duplicate_detection_uses_the_trimmed_url() {
    let h = Harness::new();

    h.feeds.create_feed("https://example.com/feed.xml").await.unwrap();
    let err = h
        .feeds
        .create_feed("  https://example.com/feed.xml  ")
        .await
        .unwrap_err();

    assert!(matches!(err, FeedServiceError::DuplicateUrl));
}

#[tokio::test]
async fn test_invalid_url_is_rejected() {
    let h = Harness::new();

    for url in ["", "not-a-url", "ftp://example.com/feed"] {
        let err = h.feeds.create_feed(url).await.unwrap_err();
        assert!(matches!(err, FeedServiceError::Invalid(_)), "{url:?}");
    }
    assert_eq!(FeedStore::count(h.store.as_ref()).await.unwrap(), 0);
}

#[tokio::test]
async fn test_new_feed_has_no_status() {
    let h = Harness::new();

    let feed = h.feeds.create_feed("https://example.com/rss").await.unwrap();

    assert_eq!(feed.title, None);
    assert_eq!(feed.url, "https://example.com/rss");
    assert!(!feed.is_test_source);
    assert!(feed.last_success_at.is_none());
    assert!(feed.last_error.is_none());
    assert!(feed.last_error_at.is_none());
}

#[tokio::test]
async fn test_seeding_is_idempotent() {
    let h = Harness::new();
    let mut urls: Vec<String> = DEFAULT_FEEDS.iter().map(|s| s.to_string()).collect();
    urls.push("not a url".to_string());

    let first = h.feeds.seed_feeds(&urls).await.unwrap();
    let second = h.feeds.seed_feeds(&urls).await.unwrap();

    assert_eq!((first.created, first.existed, first.errors), (4, 0, 1));
    assert_eq!((second.created, second.existed, second.errors), (0, 4, 1));
}

#[tokio::test]
async fn test_missing_item_is_not_found() {
    let h = Harness::new();

    assert!(matches!(
        h.items.get_item(999).await,
        Err(ItemServiceError::NotFound)
    ));
    assert!(matches!(
        h.items.delete_item(999).await,
        Err(ItemServiceError::NotFound)
    ));
}

#[tokio::test]
async fn test_missing_feed_is_not_found() {
    let h = Harness::new();

    assert!(matches!(
        h.feeds.get_feed(42).await,
        Err(FeedServiceError::NotFound)
    ));
    assert!(matches!(
        h.feeds.delete_feed(42).await,
        Err(FeedServiceError::NotFound)
    ));
}

#[tokio::test]
async fn test_item_detail_includes_its_feed() {
    let server = FeedServer::start().await;
    let h = Harness::new();
    let url = server.url("/test_feeds/test1.xml");
    let feed = h.feeds.create_feed(&url).await.unwrap();
    h.ingestion.ingest_feed(feed.id).await.unwrap();

    let page = h
        .items
        .list_items(Some(feed.id), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.total, 2);

    let item = h.items.get_item(page.items[0].id).await.unwrap();
    assert_eq!(item.feed_url.as_deref(), Some(url.as_str()));
    assert_eq!(item.feed_title.as_deref(), Some("Test Feed 1"));
}

#[tokio::test]
async fn test_item_listing_is_paginated_newest_first() {
    let server = FeedServer::start().await;
    let h = Harness::new();
    for path in ["/test_feeds/test1.xml", "/test_feeds/test2.xml"] {
        h.feeds.create_feed(&server.url(path)).await.unwrap();
    }
    h.ingestion.ingest_all(false).await.unwrap();

    let first = h.items.list_items(None, PageRequest::new(1, 2)).await.unwrap();
    let last = h.items.list_items(None, PageRequest::new(3, 2)).await.unwrap();

    assert_eq!(first.total, 5);
    assert_eq!(first.total_pages, 3);
    let titles: Vec<&str> = first.items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["Test Item A", "Test Item 2"]);
    assert_eq!(last.items.len(), 1);
}

#[tokio::test]
async fn test_deleting_a_feed_removes_its_items() {
    let server = FeedServer::start().await;
    let h = Harness::new();
    let feed = h
        .feeds
        .create_feed(&server.url("/test_feeds/test1.xml"))
        .await
        .unwrap();
    h.ingestion.ingest_feed(feed.id).await.unwrap();

    h.feeds.delete_feed(feed.id).await.unwrap();

    assert!(h.store.all_items().is_empty());
    assert!(h.store.feed(feed.id).is_none());
}

#[tokio::test]
async fn test_delete_all_items_keeps_feeds() {
    let server = FeedServer::start().await;
    let h = Harness::new();
    let feed = h
        .feeds
        .create_feed(&server.url("/test_feeds/test2.xml"))
        .await
        .unwrap();
    h.ingestion.ingest_feed(feed.id).await.unwrap();

    assert_eq!(h.items.delete_all_items().await.unwrap(), 3);
    assert!(h.store.all_items().is_empty());
    assert!(h.store.feed(feed.id).is_some());
}

#[tokio::test]
async fn test_stats_on_an_empty_store() {
    let h = Harness::new();

    let stats = h.stats.stats().await.unwrap();
    let response = StatsResponse::from(stats);

    assert_eq!(response.feeds_count, 0);
    assert_eq!(response.items_count, 0);
    assert_eq!(response.last_success, "Never");
    assert_eq!(response.last_error, "Never");
}

#[tokio::test]
async fn test_stats_report_latest_success_and_error() {
    let server = FeedServer::start().await;
    let h = Harness::new();
    let ok_url = server.url("/test_feeds/test1.xml");
    let broken_url = server.url("/test_feeds/error404.xml");
    let ok = h.feeds.create_feed(&ok_url).await.unwrap();
    let broken = h.feeds.create_feed(&broken_url).await.unwrap();

    h.ingestion.ingest_feed(ok.id).await.unwrap();
    h.ingestion.ingest_feed(broken.id).await.unwrap_err();

    let stats = h.stats.stats().await.unwrap();

    assert_eq!(stats.feeds_count, 2);
    assert_eq!(stats.items_count, 2);
    assert_eq!(stats.last_success.unwrap().feed_url, ok_url);
    let last_error = stats.last_error.unwrap();
    assert_eq!(last_error.feed_url, broken_url);
    assert_eq!(last_error.message, "HTTP 404 Not Found");
}
