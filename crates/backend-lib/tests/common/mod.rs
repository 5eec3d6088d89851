//! Test utilities shared by the integration tests.
#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use starboard_backend_lib::{config::Settings, router::create_router, AppState};
use starboard_common::AuthResponse;
use std::sync::Arc;
use tower::ServiceExt;

pub const SECRET: &str = "integration-test-secret-0123456789";

/// Settings with a signing secret and a cheap scrypt cost
pub fn test_settings() -> Settings {
    let mut settings = Settings::default();
    settings.auth.jwt_secret = SECRET.to_string();
    settings.auth.scrypt_log_n = 4;
    settings
}

/// Build the full router over a fresh in-memory store
pub fn setup_app(settings: Settings) -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState::in_memory(settings).expect("Failed to create AppState for test"));
    (create_router(state.clone()), state)
}

pub fn json_request(method: Method, uri: &str, body: Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn empty_request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

/// Run one request and decode the JSON body (`Null` when empty)
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

/// Register a user through the API and return the response body
pub async fn signup(app: &Router, email: &str, password: &str) -> AuthResponse {
    let (status, body) = send(
        app,
        json_request(
            Method::POST,
            "/api/auth/signup",
            serde_json::json!({ "email": email, "password": password }),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "signup failed: {body}");
    serde_json::from_value(body).unwrap()
}
