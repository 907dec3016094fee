use crate::common::feed_server::TEST1_XML;
use crate::common::FeedServer;
use feedhub_backend::domain::ingestion::{FeedFetcher, FetchError};
use feedhub_backend::infrastructure::fetcher::ReqwestFeedFetcher;
use pretty_assertions::assert_eq;
use std::time::Duration;

fn fetcher(max_body_bytes: usize) -> ReqwestFeedFetcher {
    ReqwestFeedFetcher::new("feedhub-backend-tests", Duration::from_secs(5), max_body_bytes)
        .expect("Failed to build fetcher")
}

#[tokio::test]
async fn test_body_within_the_limit_is_returned_whole() {
    let server = FeedServer::start().await;

    let document = fetcher(TEST1_XML.len())
        .fetch(&server.url("/test_feeds/test1.xml"))
        .await
        .unwrap();

    assert_eq!(document.body, TEST1_XML.as_bytes());
}

#[tokio::test]
async fn test_body_over_the_limit_is_rejected() {
    let server = FeedServer::start().await;
    let huge = format!("<rss>{}</rss>", "x".repeat(64 * 1024));
    server.set_feed("/test_feeds/huge.xml", &huge);

    let err = fetcher(16 * 1024)
        .fetch(&server.url("/test_feeds/huge.xml"))
        .await
        .unwrap_err();

    assert_eq!(err, FetchError::TooLarge { limit: 16 * 1024 });
    assert_eq!(err.to_string(), "response body exceeds 16384 bytes");
}

#[tokio::test]
async fn test_status_errors_carry_the_reason_phrase() {
    let server = FeedServer::start().await;

    let err = fetcher(1024)
        .fetch(&server.url("/test_feeds/error404.xml"))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "HTTP 404 Not Found");
}
