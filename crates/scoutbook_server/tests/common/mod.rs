use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use scoutbook_core::Store;
use scoutbook_server::{build_router, AppState};
use serde_json::Value;
use tower::ServiceExt;

pub fn app() -> Router {
    build_router(AppState::new(Store::open_in_memory().unwrap()))
}

/// Sends one request through the router and returns status plus JSON body.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, json)
}
