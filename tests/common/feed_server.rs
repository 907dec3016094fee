use axum::{
    extract::State,
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

pub const TEST1_XML: &str = include_str!("../fixtures/test_feeds/test1.xml");
pub const TEST2_XML: &str = include_str!("../fixtures/test_feeds/test2.xml");
pub const TEST1_RETITLED_XML: &str = include_str!("../fixtures/test_feeds/test1_retitled.xml");
pub const MALFORMED_XML: &str = include_str!("../fixtures/test_feeds/malformed.xml");

#[derive(Clone)]
struct Fixture {
    status: StatusCode,
    content_type: &'static str,
    body: String,
    delay: Option<Duration>,
}

#[derive(Default)]
struct Shared {
    routes: RwLock<HashMap<String, Fixture>>,
    hits: Mutex<HashMap<String, usize>>,
}

/// Local HTTP server that serves feed documents from memory
pub struct FeedServer {
    addr: SocketAddr,
    shared: Arc<Shared>,
}

impl FeedServer {
    /// Starts with `/test_feeds/test1.xml` (RSS, 2 items), `/test_feeds/test2.xml`
    /// (Atom, 3 entries), `/test_feeds/error404.xml` and `/test_feeds/error500.xml`
    pub async fn start() -> Self {
        let shared = Arc::new(Shared::default());
        let app = Router::new()
            .fallback(serve_fixture)
            .with_state(shared.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind feed server");
        let addr = listener.local_addr().expect("Failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let server = Self { addr, shared };
        server.set_feed("/test_feeds/test1.xml", TEST1_XML);
        server.set_feed("/test_feeds/test2.xml", TEST2_XML);
        server.set_status("/test_feeds/error404.xml", StatusCode::NOT_FOUND);
        server.set_status("/test_feeds/error500.xml", StatusCode::INTERNAL_SERVER_ERROR);
        server
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn set_feed(&self, path: &str, body: &str) {
        self.insert(
            path,
            Fixture {
                status: StatusCode::OK,
                content_type: "application/xml",
                body: body.to_string(),
                delay: None,
            },
        );
    }

    pub fn set_status(&self, path: &str, status: StatusCode) {
        self.insert(
            path,
            Fixture {
                status,
                content_type: "text/plain",
                body: status.canonical_reason().unwrap_or("error").to_string(),
                delay: None,
            },
        );
    }

    /// Serves `body` only after `delay`
    pub fn set_slow_feed(&self, path: &str, body: &str, delay: Duration) {
        self.insert(
            path,
            Fixture {
                status: StatusCode::OK,
                content_type: "application/xml",
                body: body.to_string(),
                delay: Some(delay),
            },
        );
    }

    pub fn hits(&self, path: &str) -> usize {
        self.shared.hits.lock().get(path).copied().unwrap_or(0)
    }

    fn insert(&self, path: &str, fixture: Fixture) {
        self.shared.routes.write().insert(path.to_string(), fixture);
    }
}

async fn serve_fixture(State(shared): State<Arc<Shared>>, uri: Uri) -> Response {
    let path = uri.path().to_string();
    *shared.hits.lock().entry(path.clone()).or_default() += 1;

    let fixture = shared.routes.read().get(&path).cloned();
    match fixture {
        Some(fixture) => {
            if let Some(delay) = fixture.delay {
                tokio::time::sleep(delay).await;
            }
            (
                fixture.status,
                [(header::CONTENT_TYPE, fixture.content_type)],
                fixture.body,
            )
                .into_response()
        }
        None => (StatusCode::NOT_FOUND, "Not Found").into_response(),
    }
}
