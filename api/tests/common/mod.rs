/// Common test utilities for driving the router in-process
use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use clap::Parser;
use frit_api::{
    config::FritApiConfig,
    server::{self, App},
};
use frit_db::storage::{Storage, memory::MemoryStorage};
use serde_json::Value;
use tower::util::ServiceExt;

/// Router over the three seed users
pub fn seeded_app() -> App {
    app_with(MemoryStorage::seeded())
}

pub fn app_with(storage: MemoryStorage) -> App {
    app_over(Arc::new(storage))
}

/// Router over any storage backend
pub fn app_over(storage: Arc<dyn Storage>) -> App {
    let config = FritApiConfig::parse_from(["frit-api"]);
    let (app, _api) = server::make(config, storage);
    app
}

/// Send a request and decode the JSON body
pub async fn send(app: &App, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    send_request(app, request).await
}

pub async fn send_request(app: &App, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };

    (status, json)
}

pub fn ids(body: &Value) -> Vec<u64> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["id"].as_u64().unwrap())
        .collect()
}
