//! Shared utilities for integration tests.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use route_register::api::default_modules;
use route_register::config::AppConfig;
use route_register::http::HttpServer;
use serde_json::Value;
use tower::ServiceExt;

pub const API_KEY: &str = "test-key";

/// Server with the default modules and a known API key.
pub fn test_server() -> HttpServer {
    let mut config = AppConfig::default();
    config.auth.api_key = API_KEY.to_string();
    HttpServer::new(config, default_modules())
}

/// Build a request, optionally authenticated with the test API key.
#[allow(dead_code)]
pub fn request(method: &str, uri: &str, authed: bool, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if authed {
        builder = builder.header("authorization", format!("Bearer {}", API_KEY));
    }
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Send `req` through `router` and decode the JSON body (Null when empty).
pub async fn send(router: Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}
