//! Scripted mock of the trading API, served by axum on an ephemeral port.

#![allow(dead_code)]

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;
use stockdesk::core::ClientConfig;
use stockdesk::services::api::ApiClient;
use stockdesk::services::storage::MemoryStorage;
use stockdesk::session::{SessionManager, SessionStore};

/// One request as the server saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: String,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body is JSON")
    }
}

#[derive(Clone)]
struct Reply {
    status: StatusCode,
    body: String,
    delay: Duration,
}

#[derive(Clone, Default)]
struct MockState {
    // Queue per route; the last reply stays in place and answers every later call
    routes: Arc<Mutex<HashMap<(Method, String), VecDeque<Reply>>>>,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

pub struct MockServer {
    pub base_url: String,
    state: MockState,
}

impl MockServer {
    pub async fn start() -> Self {
        let state = MockState::default();
        let app = Router::new().fallback(handle).with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock server");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock server");
        });

        Self {
            base_url: format!("http://{}/api", addr),
            state,
        }
    }

    pub fn respond(&self, method: Method, path: &str, status: u16, body: &str) {
        self.respond_after(method, path, status, body, Duration::ZERO);
    }

    pub fn respond_after(&self, method: Method, path: &str, status: u16, body: &str, delay: Duration) {
        let reply = Reply {
            status: StatusCode::from_u16(status).expect("status code"),
            body: body.to_string(),
            delay,
        };
        self.state
            .routes
            .lock()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(reply);
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<Recorded> {
        self.requests().into_iter().filter(|r| r.path == path).collect()
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig {
            api_base_url: self.base_url.clone(),
            request_timeout: Duration::from_secs(5),
            ..ClientConfig::default()
        }
    }

    /// Client and session manager over in-memory storage.
    pub fn session(&self) -> (Arc<ApiClient>, Arc<SessionManager>, SessionStore) {
        let store = SessionStore::new(Arc::new(MemoryStorage::new()));
        self.session_with(store)
    }

    pub fn session_with(&self, store: SessionStore) -> (Arc<ApiClient>, Arc<SessionManager>, SessionStore) {
        let api = Arc::new(ApiClient::new(&self.config(), store.clone()));
        let manager = Arc::new(SessionManager::new(api.clone(), store.clone()));
        (api, manager, store)
    }
}

async fn handle(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    state.requests.lock().push(Recorded {
        method: method.clone(),
        path: path.clone(),
        query: uri.query().map(str::to_string),
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    });

    let reply = {
        let mut routes = state.routes.lock();
        routes.get_mut(&(method, path)).and_then(|queue| {
            if queue.len() > 1 {
                queue.pop_front()
            } else {
                queue.front().cloned()
            }
        })
    };

    match reply {
        Some(reply) => {
            if !reply.delay.is_zero() {
                tokio::time::sleep(reply.delay).await;
            }
            (
                reply.status,
                [(header::CONTENT_TYPE, "application/json")],
                reply.body,
            )
                .into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "application/json")],
            r#"{"message":"Route not found"}"#,
        )
            .into_response(),
    }
}

pub const USER_A: &str = r#"{"id":1,"name":"A","email":"a@b.com","balance":0}"#;
pub const LOGIN_A: &str =
    r#"{"user":{"id":1,"name":"A","email":"a@b.com","balance":0},"token":"tok1"}"#;

/// Address where nothing is listening.
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{}/api", addr)
}
