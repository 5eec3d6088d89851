//! Catalog search proxy against a local fake upstream.
mod common;

use axum::{
    extract::Query,
    http::{Method, StatusCode},
    routing::get,
    Json, Router,
};
use common::{empty_request, send, setup_app, test_settings};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use tokio::net::TcpListener;

async fn people(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let search = params.get("search").cloned().unwrap_or_default();
    Json(json!({
        "count": 1,
        "results": [{ "name": format!("match:{search}"), "eye_color": "blue" }]
    }))
}

/// Serve a fake catalog on an ephemeral port
async fn fake_catalog() -> SocketAddr {
    let app = Router::new()
        .route("/api/people/", get(people))
        .route("/broken/people/", get(|| async { StatusCode::SERVICE_UNAVAILABLE }))
        .route("/garbled/people/", get(|| async { "not json" }));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn app_with_catalog(base_url: String) -> Router {
    let mut settings = test_settings();
    settings.catalog.base_url = base_url;
    settings.catalog.timeout_secs = 5;
    setup_app(settings).0
}

#[tokio::test]
async fn test_search_forwards_query_and_returns_upstream_body() {
    let addr = fake_catalog().await;
    let app = app_with_catalog(format!("http://{addr}/api/"));

    let (status, body) = send(
        &app,
        empty_request(Method::GET, "/api/characters?search=luke", None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["results"][0]["name"], "match:luke");
}

#[tokio::test]
async fn test_search_without_query_forwards_empty_search() {
    let addr = fake_catalog().await;
    let app = app_with_catalog(format!("http://{addr}/api"));

    let (status, body) = send(&app, empty_request(Method::GET, "/api/characters", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"][0]["name"], "match:");
}

#[tokio::test]
async fn test_upstream_failures_map_to_bad_gateway() {
    let addr = fake_catalog().await;

    for base in [format!("http://{addr}/broken"), format!("http://{addr}/garbled")] {
        let app = app_with_catalog(base.clone());
        let (status, body) = send(
            &app,
            empty_request(Method::GET, "/api/characters?search=luke", None),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY, "{base}");
        assert_eq!(body["error"]["code"], "UPSTREAM_001");
    }
}

#[tokio::test]
async fn test_unreachable_upstream_maps_to_bad_gateway() {
    // Bind then drop to get a port nothing listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let app = app_with_catalog(format!("http://{addr}/api"));
    let (status, _) = send(
        &app,
        empty_request(Method::GET, "/api/characters?search=luke", None),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}
