//! Health Check API Tests

use axum::http::StatusCode;

use crate::common::TestApp;

#[tokio::test]
async fn health_check_returns_ok() {
    let app = TestApp::new();

    let response = app.server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let json: serde_json::Value = response.json();
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn unknown_route_returns_not_found() {
    let app = TestApp::new();

    let response = app.server.get("/nope").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
