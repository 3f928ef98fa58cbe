//! A local stand-in for the backend's auth and table APIs.
//!
//! Serves just enough of `/auth/v1` and `/rest/v1/listings` on an ephemeral
//! port for the storefront's own client to sign in, read, insert and delete.

use std::sync::{Arc, Mutex, PoisonError};

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use url::Url;

/// Id of the user every sign-in resolves to; matches [`crate::listing`]'s seller.
pub const STUB_USER_ID: &str = "seller-1";

/// Email of the stub user.
pub const STUB_EMAIL: &str = "maker@example.com";

/// Id the stub assigns to an inserted row.
pub const INSERTED_ID: &str = "remote-new";

/// How the stub answers.
#[derive(Debug, Clone, Default)]
pub struct StubConfig {
    /// `app_metadata.role` of the signed-in user.
    pub role: Option<String>,
    /// Answer inserts and deletes with a 500.
    pub fail_writes: bool,
    /// Rows returned from a listing select.
    pub rows: Vec<Value>,
}

/// A running stub and the requests it has seen.
#[derive(Debug, Clone)]
pub struct StubBackend {
    pub url: Url,
    writes: Arc<Mutex<Vec<String>>>,
}

impl StubBackend {
    /// Write requests received so far, as `"METHOD query"`.
    #[must_use]
    pub fn writes(&self) -> Vec<String> {
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[derive(Clone)]
struct StubState {
    config: Arc<StubConfig>,
    writes: Arc<Mutex<Vec<String>>>,
}

impl StubState {
    fn record(&self, entry: String) {
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry);
    }
}

/// Start a stub on `127.0.0.1` and return its base URL.
///
/// # Panics
///
/// Panics if no local port can be bound.
#[allow(clippy::unwrap_used)]
pub async fn spawn(config: StubConfig) -> StubBackend {
    let writes = Arc::new(Mutex::new(Vec::new()));
    let state = StubState {
        config: Arc::new(config),
        writes: Arc::clone(&writes),
    };

    let app = Router::new()
        .route("/auth/v1/token", post(token))
        .route("/auth/v1/logout", post(no_content))
        .route("/auth/v1/health", get(no_content))
        .route(
            "/rest/v1/listings",
            get(select).post(insert).delete(delete),
        )
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    StubBackend {
        url: Url::parse(&format!("http://{addr}/")).unwrap(),
        writes,
    }
}

async fn token(State(state): State<StubState>) -> Json<Value> {
    Json(json!({
        "access_token": "stub-access-token",
        "refresh_token": "stub-refresh-token",
        "expires_in": 3600,
        "user": {
            "id": STUB_USER_ID,
            "email": STUB_EMAIL,
            "user_metadata": { "full_name": "Stub Maker" },
            "app_metadata": { "role": state.config.role },
        }
    }))
}

async fn no_content() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn select(State(state): State<StubState>) -> Json<Value> {
    Json(Value::Array(state.config.rows.clone()))
}

fn write_failed() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "message": "write rejected" })),
    )
        .into_response()
}

async fn insert(State(state): State<StubState>, Json(rows): Json<Vec<Value>>) -> Response {
    state.record("POST".to_string());
    if state.config.fail_writes {
        return write_failed();
    }

    let stored: Vec<Value> = rows
        .into_iter()
        .map(|mut row| {
            row["id"] = json!(INSERTED_ID);
            row["created_at"] = json!("2026-03-02T08:00:00Z");
            row
        })
        .collect();
    (StatusCode::CREATED, Json(Value::Array(stored))).into_response()
}

async fn delete(State(state): State<StubState>, uri: axum::http::Uri) -> Response {
    state.record(format!("DELETE {}", uri.query().unwrap_or_default()));
    if state.config.fail_writes {
        return write_failed();
    }
    StatusCode::NO_CONTENT.into_response()
}
