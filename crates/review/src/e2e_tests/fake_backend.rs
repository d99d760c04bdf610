//! In-process stand-in for the association backend.
//!
//! Records every request it receives and answers list (GET) and decision
//! (POST) calls with canned responses.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use serde_json::Value;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// A request as the fake backend saw it
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub correlation_id: Option<String>,
    pub body: Option<Value>,
}

#[derive(Debug, Clone)]
pub struct CannedResponse {
    pub status: StatusCode,
    pub body: String,
}

impl CannedResponse {
    pub fn json(status: StatusCode, body: Value) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }

    pub fn text(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }

    pub fn empty(status: StatusCode) -> Self {
        Self::text(status, "")
    }
}

struct BackendState {
    recorded: Mutex<Vec<RecordedRequest>>,
    list: Mutex<CannedResponse>,
    decision: Mutex<CannedResponse>,
}

pub struct FakeBackend {
    pub addr: SocketAddr,
    state: Arc<BackendState>,
    server: JoinHandle<()>,
}

impl FakeBackend {
    pub async fn start() -> Self {
        let state = Arc::new(BackendState {
            recorded: Mutex::new(Vec::new()),
            list: Mutex::new(CannedResponse::json(StatusCode::OK, Value::Array(Vec::new()))),
            decision: Mutex::new(CannedResponse::json(
                StatusCode::OK,
                serde_json::json!({ "success": true }),
            )),
        });

        let router = Router::new().fallback(handle).with_state(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake backend");
        let addr = listener.local_addr().expect("fake backend address");
        let server = tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Self {
            addr,
            state,
            server,
        }
    }

    /// Base URL including the `/api` prefix the real backend mounts under.
    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    pub async fn respond_to_list(&self, response: CannedResponse) {
        *self.state.list.lock().await = response;
    }

    pub async fn respond_to_decision(&self, response: CannedResponse) {
        *self.state.decision.lock().await = response;
    }

    pub async fn recorded(&self) -> Vec<RecordedRequest> {
        self.state.recorded.lock().await.clone()
    }

    pub async fn recorded_posts(&self) -> Vec<RecordedRequest> {
        self.recorded()
            .await
            .into_iter()
            .filter(|r| r.method == Method::POST)
            .collect()
    }
}

impl Drop for FakeBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}

async fn handle(
    State(state): State<Arc<BackendState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let recorded = RecordedRequest {
        method: method.clone(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        authorization: header("authorization"),
        correlation_id: header("x-correlation-id"),
        body: serde_json::from_slice(&body).ok(),
    };
    state.recorded.lock().await.push(recorded);

    let canned = if method == Method::POST {
        state.decision.lock().await.clone()
    } else {
        state.list.lock().await.clone()
    };
    (canned.status, canned.body).into_response()
}
