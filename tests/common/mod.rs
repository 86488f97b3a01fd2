//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::IntoResponse,
    Router,
};
use tokio::net::TcpListener;

/// A request as seen by the mock backend.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub body: String,
}

#[allow(dead_code)]
impl RecordedRequest {
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

struct MockState {
    status: StatusCode,
    body: &'static str,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// Handle to a running mock backend.
pub struct MockBackend {
    pub addr: SocketAddr,
    state: Arc<MockState>,
}

#[allow(dead_code)]
impl MockBackend {
    /// Base URL the client should be pointed at.
    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn single_request(&self) -> RecordedRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request, got {:?}", requests);
        requests.into_iter().next().unwrap()
    }
}

/// Start a backend on an ephemeral port that answers every request with a
/// fixed status and JSON body, recording what it receives.
pub async fn start_mock_backend(status: u16, body: &'static str) -> MockBackend {
    let state = Arc::new(MockState {
        status: StatusCode::from_u16(status).unwrap(),
        body,
        requests: Mutex::new(Vec::new()),
    });

    let app = Router::new().fallback(record).with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockBackend { addr, state }
}

/// An address nothing is listening on.
#[allow(dead_code)]
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

async fn record(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    let query = uri
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default();

    state.requests.lock().unwrap().push(RecordedRequest {
        method,
        path: uri.path().to_string(),
        query,
        headers,
        body,
    });

    (state.status, [(header::CONTENT_TYPE, "application/json")], state.body)
}
