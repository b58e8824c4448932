//! Integration tests for the health probes and top-level routing.
//!
//! Tests cover:
//! - Health, readiness, liveness, and version endpoints
//! - The root redirect into the browse UI
//! - The served OpenAPI document

mod common;

use axum::{body, http::Method, response::Response};
use common::{location, TestApp};
use serde_json::Value;

async fn response_json(response: Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body bytes");
    serde_json::from_slice(&bytes).expect("json response")
}

// ==================== Probe Tests ====================

#[tokio::test]
async fn test_health_endpoint_reports_up() {
    let app = TestApp::new().await;

    let response = app.request(Method::GET, "/health").await;
    assert_eq!(response.status(), 200);

    let body = response_json(response).await;
    assert_eq!(body["status"], "up");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_readiness_probe_checks_the_database() {
    let app = TestApp::new().await;

    let response = app.request(Method::GET, "/health/ready").await;
    assert_eq!(response.status(), 200);

    let body = response_json(response).await;
    assert_eq!(body["ready"], true);
}

#[tokio::test]
async fn test_liveness_probe_is_always_up() {
    let app = TestApp::new().await;

    let response = app.request(Method::GET, "/health/live").await;
    assert_eq!(response.status(), 200);

    let body = response_json(response).await;
    assert_eq!(body["alive"], true);
}

#[tokio::test]
async fn test_version_endpoint_reports_crate_version() {
    let app = TestApp::new().await;

    let response = app.request(Method::GET, "/health/version").await;
    assert_eq!(response.status(), 200);

    let body = response_json(response).await;
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

// ==================== Routing Tests ====================

#[tokio::test]
async fn test_root_redirects_into_the_browse_ui() {
    let app = TestApp::new().await;

    let response = app.request(Method::GET, "/").await;
    assert_eq!(response.status(), 307);
    assert_eq!(location(&response), "/suppliers/");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = TestApp::new().await;

    let response = app.request(Method::GET, "/api-docs/openapi.json").await;
    assert_eq!(response.status(), 200);

    let body = response_json(response).await;
    assert_eq!(body["info"]["title"], "Supplier Portal API");
    assert!(
        body["paths"]["/suppliers/dashboard/"].is_object(),
        "Browse routes should be documented"
    );
}
