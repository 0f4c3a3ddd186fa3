//! Stub control plane for integration tests. Each test scripts the operation
//! snapshots and write results it expects, then drives the real client
//! against a local HTTP server.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use strato_client::ApiClient;

/// Route client log output through the test harness. `RUST_LOG` selects the
/// verbosity; repeated calls are no-ops.
pub fn init_tracing() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// One recorded mutating call.
#[derive(Debug, Clone)]
pub struct Submission {
    pub method: String,
    pub path: String,
    pub body: Value,
}

enum OpScript {
    Snapshot(Value),
    /// Next poll of this operation fails with an undecodable 500.
    TransportError,
}

enum WriteScript {
    Operation(Value),
    Error(u16, Value),
}

#[derive(Default)]
pub struct StubState {
    operations: Mutex<HashMap<String, VecDeque<OpScript>>>,
    writes: Mutex<VecDeque<WriteScript>>,
    reads: Mutex<HashMap<String, Value>>,
    submissions: Mutex<Vec<Submission>>,
}

impl StubState {
    /// Queue successive snapshots returned by `GET /operations/{id}`.
    pub fn script_operation(&self, id: &str, snapshots: Vec<Value>) {
        let mut operations = self.operations.lock().unwrap();
        let queue = operations.entry(id.to_string()).or_default();
        queue.extend(snapshots.into_iter().map(OpScript::Snapshot));
    }

    /// Make the next poll of `id` fail at the transport level.
    pub fn script_operation_fetch_error(&self, id: &str) {
        let mut operations = self.operations.lock().unwrap();
        operations
            .entry(id.to_string())
            .or_default()
            .push_back(OpScript::TransportError);
    }

    /// Queue the operation returned by the next mutating call.
    pub fn script_write(&self, operation: Value) {
        self.writes
            .lock()
            .unwrap()
            .push_back(WriteScript::Operation(operation));
    }

    /// Make the next mutating call fail with an error document.
    pub fn script_write_error(&self, status: u16, message: &str) {
        self.writes.lock().unwrap().push_back(WriteScript::Error(
            status,
            json!({"error": {"message": message, "code": 1, "http_code": status}}),
        ));
    }

    /// Serve `body` for `GET` on the given full path, e.g.
    /// `/api/1.0/volumes/abc123`.
    pub fn script_read(&self, path: &str, body: Value) {
        self.reads.lock().unwrap().insert(path.to_string(), body);
    }

    pub fn submissions(&self) -> Vec<Submission> {
        self.submissions.lock().unwrap().clone()
    }
}

pub struct StubServer {
    pub base_url: String,
    pub state: Arc<StubState>,
}

impl StubServer {
    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.base_url, "test-token").unwrap()
    }
}

pub async fn spawn() -> StubServer {
    init_tracing();
    let state = Arc::new(StubState::default());
    let app = Router::new()
        .route("/api/1.0/operations/:id", get(get_operation))
        .fallback(fallback)
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    StubServer {
        base_url: format!("http://{addr}"),
        state,
    }
}

async fn get_operation(State(state): State<Arc<StubState>>, Path(id): Path<String>) -> Response {
    let script = state
        .operations
        .lock()
        .unwrap()
        .get_mut(&id)
        .and_then(|queue| queue.pop_front());
    match script {
        Some(OpScript::Snapshot(snapshot)) => Json(snapshot).into_response(),
        Some(OpScript::TransportError) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "stub transport failure").into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": {"message": format!("operation {id} not scripted")}})),
        )
            .into_response(),
    }
}

async fn fallback(
    State(state): State<Arc<StubState>>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();

    if method == Method::GET {
        let read = state.reads.lock().unwrap().get(&path).cloned();
        return match read {
            Some(body) => Json(body).into_response(),
            None => (
                StatusCode::NOT_FOUND,
                Json(json!({"error": {"message": format!("not found: {path}")}})),
            )
                .into_response(),
        };
    }

    state.submissions.lock().unwrap().push(Submission {
        method: method.to_string(),
        path: path.clone(),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    });

    match state.writes.lock().unwrap().pop_front() {
        Some(WriteScript::Operation(operation)) => Json(operation).into_response(),
        Some(WriteScript::Error(status, body)) => (
            StatusCode::from_u16(status).unwrap(),
            Json(body),
        )
            .into_response(),
        None => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": {"message": format!("unscripted write: {method} {path}")}})),
        )
            .into_response(),
    }
}

//
// Operation snapshot builders
//

pub fn pending_op(id: &str, retry_in: u64) -> Value {
    json!({"id": id, "request_type": "stub", "status": "Pending", "retry_in": retry_in})
}

pub fn running_op(id: &str, retry_in: u64) -> Value {
    json!({"id": id, "request_type": "stub", "status": "Running", "retry_in": retry_in})
}

pub fn succeeded_op(id: &str) -> Value {
    json!({"id": id, "request_type": "stub", "status": "Succeeded", "retry_in": 0})
}

pub fn succeeded_op_with_result(id: &str, resource_id: &str) -> Value {
    json!({
        "id": id,
        "request_type": "stub",
        "status": "Succeeded",
        "retry_in": 0,
        "result": {"resource": {"id": resource_id, "name": resource_id}}
    })
}

pub fn failed_op(id: &str, message: &str) -> Value {
    json!({
        "id": id,
        "request_type": "stub",
        "status": "Failed",
        "retry_in": 0,
        "error": {"message": message, "code": 42, "http_code": 400}
    })
}
