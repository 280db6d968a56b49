//! Stub HTTP backend speaking the Lumen wire format, for end-to-end tests.
//!
//! Behaves like the real service for a single stored `.parquet` file and
//! answers predictions with [`synthetic_predictions`](crate::synthetic_predictions).

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Request, State};
use axum::http::{header, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use bytes::Bytes;
use chrono::NaiveDate;
use lumen_core::config::ApiConfig;
use lumen_core::constants::{paths, REQUEST_ID_HEADER, UPLOAD_FIELD, WIRE_DATE_FORMAT};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::synthetic_predictions;

/// One request as the stub saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub request_id: Option<String>,
}

#[derive(Default)]
struct Inner {
    file: Option<(String, Vec<u8>)>,
    requests: Vec<RecordedRequest>,
    forced_status: Option<u16>,
}

#[derive(Clone, Default)]
struct StubState {
    inner: Arc<Mutex<Inner>>,
}

impl StubState {
    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Running stub server bound to an ephemeral localhost port. Stops on drop.
pub struct StubBackend {
    addr: SocketAddr,
    state: StubState,
    task: JoinHandle<()>,
}

impl StubBackend {
    /// Bind `127.0.0.1:0` and start serving.
    ///
    /// # Panics
    /// Panics if the listener cannot be bound.
    pub async fn start() -> Self {
        let state = StubState::default();
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .unwrap_or_else(|e| panic!("Failed to bind stub backend: {e}"));
        let addr = listener
            .local_addr()
            .unwrap_or_else(|e| panic!("Failed to read stub address: {e}"));
        let app = create_router(state.clone());
        let task = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        Self { addr, state, task }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// API config pointing at this stub.
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.base_url(),
            timeout_secs: 5,
            ..ApiConfig::default()
        }
    }

    pub fn seed_file(&self, filename: &str, contents: &[u8]) {
        self.state.lock().file = Some((filename.to_string(), contents.to_vec()));
    }

    pub fn stored_file(&self) -> Option<(String, Vec<u8>)> {
        self.state.lock().file.clone()
    }

    /// Answer every request with `status` until cleared with `None`.
    pub fn force_status(&self, status: Option<u16>) {
        self.state.lock().forced_status = status;
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().requests.clone()
    }
}

impl Drop for StubBackend {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn create_router(state: StubState) -> Router {
    Router::new()
        .route(
            paths::FILE,
            get(check_file).post(upload_file).delete(delete_file),
        )
        .route(paths::FILE_DOWNLOAD, get(download_file))
        .route(paths::PREDICT, post(predict))
        .layer(middleware::from_fn_with_state(state.clone(), record))
        .with_state(state)
}

async fn record(State(state): State<StubState>, req: Request, next: Next) -> Response {
    let forced = {
        let mut inner = state.lock();
        inner.requests.push(RecordedRequest {
            method: req.method().to_string(),
            path: req.uri().path().to_string(),
            request_id: req
                .headers()
                .get(REQUEST_ID_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
        });
        inner.forced_status
    };
    if let Some(code) = forced {
        let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return (status, Json(json!({"error": "injected failure"}))).into_response();
    }
    next.run(req).await
}

fn error(status: StatusCode, key: &str, message: &str) -> (StatusCode, Json<Value>) {
    let mut body = serde_json::Map::new();
    body.insert(key.to_string(), Value::String(message.to_string()));
    (status, Json(Value::Object(body)))
}

async fn check_file(State(state): State<StubState>) -> Json<Value> {
    match &state.lock().file {
        Some((name, _)) => Json(json!({"filename": name, "exists": true})),
        None => Json(json!({"filename": "", "exists": false})),
    }
}

async fn upload_file(
    State(state): State<StubState>,
    mut multipart: Multipart,
) -> (StatusCode, Json<Value>) {
    let mut upload = None;
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        match field.bytes().await {
            Ok(bytes) => upload = Some((filename, bytes.to_vec())),
            Err(e) => return error(StatusCode::BAD_REQUEST, "error", &e.to_string()),
        }
        break;
    }

    let Some((filename, contents)) = upload else {
        return error(
            StatusCode::BAD_REQUEST,
            "error",
            "No file part in the request",
        );
    };
    if filename.is_empty() {
        return error(StatusCode::BAD_REQUEST, "error", "No selected file");
    }
    if !filename.to_lowercase().ends_with(".parquet") {
        return error(
            StatusCode::BAD_REQUEST,
            "error",
            "Only .parquet files are allowed",
        );
    }

    let mut inner = state.lock();
    if inner.file.is_some() {
        return error(
            StatusCode::BAD_REQUEST,
            "error",
            "A .parquet file already exists on the server",
        );
    }
    inner.file = Some((filename, contents));
    (
        StatusCode::OK,
        Json(json!({"success": "File uploaded successfully"})),
    )
}

async fn delete_file(State(state): State<StubState>) -> Json<Value> {
    match state.lock().file.take() {
        Some((name, _)) => Json(json!({
            "success": "Deleted .parquet file",
            "deleted_file": [name],
        })),
        None => Json(json!({"message": "No .parquet files found to delete"})),
    }
}

async fn download_file(State(state): State<StubState>) -> Response {
    match state.lock().file.clone() {
        Some((name, contents)) => (
            [
                (header::CONTENT_TYPE, "application/octet-stream".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename={name}"),
                ),
            ],
            contents,
        )
            .into_response(),
        None => error(StatusCode::NOT_FOUND, "error", "No .parquet file found").into_response(),
    }
}

async fn predict(State(state): State<StubState>, body: Bytes) -> (StatusCode, Json<Value>) {
    if state.lock().file.is_none() {
        return error(StatusCode::NOT_FOUND, "error", " Parquet file not found");
    }
    let data: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    if data.as_object().map_or(true, |o| o.is_empty()) {
        return error(StatusCode::BAD_REQUEST, "error", "No data provided");
    }

    let missing: Vec<&str> = ["start_date", "end_date"]
        .into_iter()
        .filter(|field| data.get(*field).is_none())
        .collect();
    if !missing.is_empty() {
        let message = format!("Missing data for fields: {}", missing.join(", "));
        return error(StatusCode::BAD_REQUEST, "error", &message);
    }

    let parse = |field: &str| {
        let raw = data.get(field).and_then(Value::as_str).unwrap_or_default();
        NaiveDate::parse_from_str(raw, WIRE_DATE_FORMAT).map_err(|_| {
            format!("time data '{raw}' does not match format '{WIRE_DATE_FORMAT}'")
        })
    };
    let (start, end) = match (parse("start_date"), parse("end_date")) {
        (Ok(start), Ok(end)) => (start, end),
        (Err(e), _) | (_, Err(e)) => return error(StatusCode::BAD_REQUEST, "error", &e),
    };
    if start > end {
        return error(
            StatusCode::BAD_REQUEST,
            "message",
            "Error, start date can't be after end date",
        );
    }

    let days = synthetic_predictions(start, end);
    match serde_json::to_value(days) {
        Ok(value) => (StatusCode::OK, Json(value)),
        Err(e) => error(StatusCode::INTERNAL_SERVER_ERROR, "error", &e.to_string()),
    }
}
