//! Shared mock backends for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use tokio::net::TcpListener;

use cotizer::fetch::{Endpoint, EndpointFetcher, EndpointList};

/// A request as seen by a mock backend.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub request_id: Option<String>,
    pub body: String,
    /// When the request arrived.
    pub at: Instant,
}

struct MockState {
    status: u16,
    body: String,
    delay: Duration,
    hits: AtomicUsize,
    requests: Mutex<Vec<Recorded>>,
}

/// A backend that answers every request with a fixed status and body.
#[derive(Clone)]
pub struct MockBackend {
    pub addr: SocketAddr,
    state: Arc<MockState>,
}

impl MockBackend {
    pub async fn start(status: u16, body: impl Into<String>) -> Self {
        Self::start_delayed(status, body, Duration::ZERO).await
    }

    /// Like `start`, but sleeps before answering.
    pub async fn start_delayed(status: u16, body: impl Into<String>, delay: Duration) -> Self {
        let state = Arc::new(MockState {
            status,
            body: body.into(),
            delay,
            hits: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        });
        let app = Router::new().fallback(respond).with_state(state.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        Self { addr, state }
    }

    /// Base URL with `path` appended, e.g. `http://127.0.0.1:5555/api/productos`.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().unwrap().clone()
    }
}

async fn respond(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    state.requests.lock().unwrap().push(Recorded {
        method,
        path: uri.path().to_string(),
        request_id: headers
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: String::from_utf8_lossy(&body).into_owned(),
        at: Instant::now(),
    });
    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }
    let status = StatusCode::from_u16(state.status).unwrap();
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body.clone(),
    )
        .into_response()
}

/// An address nothing listens on: bind, note the port, release it.
pub async fn dead_url(path: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}{}", addr, path)
}

pub fn endpoints(urls: &[String]) -> EndpointList {
    EndpointList::new(urls.iter().map(|u| Endpoint::parse(u).unwrap()).collect())
}

/// A fetcher that ignores proxy settings from the environment.
pub fn fetcher() -> EndpointFetcher {
    EndpointFetcher::new(reqwest::Client::builder().no_proxy().build().unwrap())
}
