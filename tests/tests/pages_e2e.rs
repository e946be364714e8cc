//! End-to-end tests for the page endpoints.
//!
//! Requests go through the real router, cache and pipeline with an in-memory
//! warehouse.

use dashboard_core::{RenderedPage, NO_DATA_NOTICE};
use integration_tests::{fixtures, setup::TestContext};

fn cell<'a>(page: &'a RenderedPage, row: usize, column: &str) -> &'a str {
    let idx = page
        .table
        .header
        .iter()
        .position(|h| h == column)
        .unwrap_or_else(|| panic!("missing column {}", column));
    &page.table.rows[row][idx]
}

#[tokio::test]
async fn test_list_pages() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/pages").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    let slugs: Vec<&str> = body["pages"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|p| p["slug"].as_str())
        .collect();
    assert_eq!(slugs.len(), 6);
    assert_eq!(slugs[0], "web-app-all-users");
    assert!(slugs.contains(&"android-onboarding-new-users"));
    assert_eq!(
        body["pages"][0]["filters"][0],
        serde_json::json!({ "name": "device", "label": "Device" })
    );
    assert_eq!(ctx.executor.call_count(), 0, "listing pages runs no query");
}

#[tokio::test]
async fn test_options_exclude_placeholders() {
    let mut rows = fixtures::web_rows();
    rows.push(
        dashboard_core::EventRow::new(fixtures::day(2), "dev-9")
            .with_event("home_page_view", None)
            .with_dimension(dashboard_core::Dimension::Country, "N/A"),
    );
    let ctx = TestContext::new().with_page_rows("web-app-all-users", rows);
    let server = ctx.server();

    let response = server.get("/pages/web-app-all-users/options").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    let options = &body["options"];
    assert_eq!(options["date_bounds"]["start"], "2024-03-01");
    assert_eq!(options["date_bounds"]["end"], "2024-03-02");
    assert_eq!(options["dimensions"]["country"], serde_json::json!(["India", "US"]));
    assert_eq!(
        options["dimensions"]["user_type"],
        serde_json::json!(["New User", "Returning User"])
    );
    assert_eq!(options["dimensions"]["region"], serde_json::json!([]));
}

#[tokio::test]
async fn test_web_table_defaults_to_full_range() {
    let ctx = TestContext::new().with_page_rows("web-app-all-users", fixtures::web_rows());
    let server = ctx.server();

    let response = server.get("/pages/web-app-all-users/table").await;
    response.assert_status_ok();

    let page: RenderedPage = response.json();
    assert_eq!(page.slug, "web-app-all-users");
    assert_eq!(page.notice, None);
    assert_eq!(page.table.rows.len(), 2);
    assert_eq!(cell(&page, 0, "Dates"), "2024-03-02");
    assert_eq!(cell(&page, 0, "home_page_view"), "1");
    assert_eq!(cell(&page, 1, "home_page_view"), "2");
    assert_eq!(cell(&page, 1, "Open_App_Playstore"), "1");
    assert_eq!(cell(&page, 1, "Open_App_Nudge_1"), "0");
}

#[tokio::test]
async fn test_web_table_applies_filters() {
    let ctx = TestContext::new().with_page_rows("web-app-all-users", fixtures::web_rows());
    let server = ctx.server();

    let response = server
        .get("/pages/web-app-all-users/table")
        .add_query_param("start", "2024-03-01")
        .add_query_param("end", "2024-03-01")
        .add_query_param("country", "US")
        .await;
    response.assert_status_ok();

    let page: RenderedPage = response.json();
    assert_eq!(page.table.rows.len(), 1);
    assert_eq!(cell(&page, 0, "home_page_view"), "1");
    assert_eq!(cell(&page, 0, "Open_App_Playstore"), "0");
}

#[tokio::test]
async fn test_repeated_filter_keys_select_several_values() {
    let mut rows = fixtures::web_rows();
    rows.push(
        dashboard_core::EventRow::new(fixtures::day(1), "dev-7")
            .with_event("home_page_view", None)
            .with_dimension(dashboard_core::Dimension::City, "Washington, D.C."),
    );
    let ctx = TestContext::new().with_page_rows("web-app-all-users", rows);
    let server = ctx.server();

    let response = server
        .get("/pages/web-app-all-users/table")
        .add_query_param("country", "India")
        .add_query_param("country", "US")
        .await;
    response.assert_status_ok();
    let page: RenderedPage = response.json();
    assert_eq!(cell(&page, 1, "home_page_view"), "2");

    let response = server
        .get("/pages/web-app-all-users/table")
        .add_query_param("city", "Washington, D.C.")
        .await;
    response.assert_status_ok();
    let page: RenderedPage = response.json();
    assert_eq!(page.table.rows.len(), 1);
    assert_eq!(cell(&page, 0, "home_page_view"), "1");
}

#[tokio::test]
async fn test_onboarding_percentages() {
    let ctx = TestContext::new()
        .with_page_rows("android-onboarding-total-users", fixtures::onboarding_rows());
    let server = ctx.server();

    let response = server
        .get("/pages/android-onboarding-total-users/table")
        .add_query_param("app_version", "2.1.0")
        .await;
    response.assert_status_ok();

    let page: RenderedPage = response.json();
    assert_eq!(cell(&page, 0, "Total Users"), "4");
    assert_eq!(cell(&page, 0, "Splash"), "50.00%");
    assert_eq!(cell(&page, 0, "User lands on Home Screen"), "25.00%");
    assert_eq!(
        cell(&page, 0, "User click on continue button after login screen"),
        "25.00%"
    );
    assert_eq!(cell(&page, 0, "No custom event"), "25.00%");
    assert_eq!(cell(&page, 0, "No Event"), "0.00%");
}

#[tokio::test]
async fn test_empty_selection_returns_notice() {
    let ctx = TestContext::new().with_page_rows("scroll-depth", fixtures::scroll_rows());
    let server = ctx.server();

    let response = server
        .get("/pages/scroll-depth/table")
        .add_query_param("user_type", "Nobody")
        .await;
    response.assert_status_ok();

    let page: RenderedPage = response.json();
    assert!(page.table.rows.is_empty());
    assert_eq!(page.table.header[0], "Dates");
    assert_eq!(page.notice.as_deref(), Some(NO_DATA_NOTICE));
}

#[tokio::test]
async fn test_inverted_range_is_empty_not_an_error() {
    let ctx = TestContext::new().with_page_rows("web-app-all-users", fixtures::web_rows());
    let server = ctx.server();

    let response = server
        .get("/pages/web-app-all-users/table")
        .add_query_param("start", "2024-03-02")
        .add_query_param("end", "2024-03-01")
        .await;
    response.assert_status_ok();

    let page: RenderedPage = response.json();
    assert!(page.table.rows.is_empty());
    assert!(page.notice.is_some());
}

#[tokio::test]
async fn test_query_results_are_cached_across_endpoints() {
    let ctx = TestContext::new().with_page_rows("web-app-all-users", fixtures::web_rows());
    let server = ctx.server();

    server.get("/pages/web-app-all-users/options").await.assert_status_ok();
    server.get("/pages/web-app-all-users/table").await.assert_status_ok();
    server
        .get("/pages/web-app-all-users/table")
        .add_query_param("country", "India")
        .await
        .assert_status_ok();
    server.get("/pages/web-app-all-users/export.csv").await.assert_status_ok();

    assert_eq!(ctx.executor.call_count(), 1);

    server.get("/pages/scroll-depth/table").await.assert_status_ok();
    assert_eq!(ctx.executor.call_count(), 2, "each page query is cached separately");
}
