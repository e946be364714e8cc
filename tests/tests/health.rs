//! Tests for health check endpoints.

use axum::http::StatusCode;
use dashboard_core::WarehouseErrorCode;
use integration_tests::setup::TestContext;

/// Test /health endpoint returns proper structure
#[tokio::test]
async fn test_health_endpoint_structure() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    let status = body["status"].as_str().unwrap_or("");
    assert!(
        status == "healthy" || status == "unhealthy",
        "Status should be 'healthy' or 'unhealthy', got '{}'",
        status
    );
    assert_eq!(body["components"][0]["name"], "warehouse");
    assert!(
        body["metrics"].get("cache_hits").is_some(),
        "Response should include the metrics snapshot"
    );
}

/// Test /health/ready pings the warehouse
#[tokio::test]
async fn test_ready_when_warehouse_answers() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/health/ready").await;
    response.assert_status(StatusCode::OK);
}

#[tokio::test]
async fn test_not_ready_when_warehouse_down() {
    let ctx = TestContext::new();
    ctx.executor.set_failure(Some(WarehouseErrorCode::Connection));
    let server = ctx.server();

    let response = server.get("/health/ready").await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

/// Test /health/live endpoint always returns 200 when service is running
#[tokio::test]
async fn test_live_endpoint() {
    let ctx = TestContext::new();
    ctx.executor.set_failure(Some(WarehouseErrorCode::Timeout));
    let server = ctx.server();

    let response = server.get("/health/live").await;
    response.assert_status(StatusCode::OK);
}
