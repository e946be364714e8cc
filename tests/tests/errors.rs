//! Tests for error responses.

use axum::http::StatusCode;
use dashboard_core::WarehouseErrorCode;
use integration_tests::{fixtures, setup::TestContext};

#[tokio::test]
async fn test_unknown_page_returns_404() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/pages/not-a-page/table").await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "PAGE_NOT_FOUND");
    assert_eq!(ctx.executor.call_count(), 0);
}

#[tokio::test]
async fn test_unknown_filter_returns_400() {
    let ctx = TestContext::new().with_page_rows("web-app-all-users", fixtures::web_rows());
    let server = ctx.server();

    // Install type is only offered on the new-users onboarding page.
    let response = server
        .get("/pages/web-app-all-users/table")
        .add_query_param("install_type", "Fresh Install")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "VALIDATION");
}

#[tokio::test]
async fn test_malformed_date_returns_400() {
    let ctx = TestContext::new().with_page_rows("web-app-all-users", fixtures::web_rows());
    let server = ctx.server();

    let response = server
        .get("/pages/web-app-all-users/export.csv")
        .add_query_param("start", "March 1st")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_connection_failure_returns_502() {
    let ctx = TestContext::new();
    ctx.executor.set_failure(Some(WarehouseErrorCode::Connection));
    let server = ctx.server();

    let response = server.get("/pages/scroll-depth/table").await;
    response.assert_status(StatusCode::BAD_GATEWAY);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "WH_001");
}

#[tokio::test]
async fn test_timeout_returns_504() {
    let ctx = TestContext::new();
    ctx.executor.set_failure(Some(WarehouseErrorCode::Timeout));
    let server = ctx.server();

    let response = server.get("/pages/android-explore-journey/options").await;
    response.assert_status(StatusCode::GATEWAY_TIMEOUT);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "WH_003");
}

#[tokio::test]
async fn test_failures_are_not_cached() {
    let ctx = TestContext::new().with_page_rows("scroll-depth", fixtures::scroll_rows());
    ctx.executor.set_failure(Some(WarehouseErrorCode::QueryFailed));
    let server = ctx.server();

    server
        .get("/pages/scroll-depth/table")
        .await
        .assert_status(StatusCode::BAD_GATEWAY);

    ctx.executor.set_failure(None);
    server.get("/pages/scroll-depth/table").await.assert_status_ok();
    assert_eq!(ctx.executor.call_count(), 2);
}
