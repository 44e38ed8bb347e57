//! Request helpers for handler tests, served over a throwaway [`FileStorage`].

use std::ops::Deref;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use hbnb_adapter_storage_json::FileStorage;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use crate::router;
use crate::state::AppState;

/// A router whose storage file lives as long as the value.
pub(crate) struct TestApp {
    router: Router,
    _dir: TempDir,
}

impl Deref for TestApp {
    type Target = Router;

    fn deref(&self) -> &Router {
        &self.router
    }
}

/// Full router over an empty file store in a fresh directory.
pub(crate) async fn app() -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::open(dir.path().join("file.json")).await.unwrap();
    TestApp {
        router: router::build(AppState::new(Arc::new(storage))),
        _dir: dir,
    }
}

pub(crate) async fn json_body(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&bytes).unwrap()
}

/// Send `body` to `uri` and decode the JSON answer.
pub(crate) async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    body: &str,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, json_body(response).await)
}
