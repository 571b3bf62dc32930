use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use dashboard_views::config::Config;
use dashboard_views::routes;
use dashboard_views::AppState;

pub fn build_router() -> Router {
    routes::router(Arc::new(AppState::new(Config::default())))
}

pub fn sales_payload() -> Value {
    json!({
        "schema": [["region", "string"], ["units", "integer"], ["rep", "string"]],
        "sample": [
            {"region": "north", "units": 10, "rep": "Ana"},
            {"region": "south", "units": 4, "rep": "Ben"},
            {"region": "north", "units": 6, "rep": "Alice"},
            {"region": "east", "units": null, "rep": "Dev"}
        ],
        "row_count": 4,
        "columns": [
            {"name": "region", "type": "string", "missing": 0, "unique": 3, "mode": "north"},
            {"name": "units", "type": "integer", "missing": 1, "unique": 3,
             "mean": 6.67, "median": 6.0, "min": 4.0, "max": 10.0, "std": 3.06},
            {"name": "rep", "type": "string", "missing": 0, "unique": 4}
        ],
        "summary": "The dataset contains 4 rows and 3 columns."
    })
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

pub async fn send_json(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = send(app, method, uri, body).await;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

pub async fn loaded_router() -> Router {
    let app = build_router();
    let (status, _) = send_json(&app, "POST", "/analytics", Some(sales_payload())).await;
    assert_eq!(status, StatusCode::OK);
    app
}
