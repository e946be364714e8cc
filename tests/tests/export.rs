//! Tests for CSV exports.

use dashboard_core::{FormattedTable, RenderedPage};
use integration_tests::{fixtures, setup::TestContext};

#[tokio::test]
async fn test_export_headers() {
    let ctx = TestContext::new().with_page_rows("scroll-depth", fixtures::scroll_rows());
    let server = ctx.server();

    let response = server.get("/pages/scroll-depth/export.csv").await;
    response.assert_status_ok();

    let content_type = response.header("content-type");
    assert!(content_type.to_str().unwrap().starts_with("text/csv"));
    let disposition = response.header("content-disposition");
    assert_eq!(
        disposition.to_str().unwrap(),
        "attachment; filename=\"scroll_depth_results.csv\""
    );
}

#[tokio::test]
async fn test_export_matches_table() {
    let ctx = TestContext::new().with_page_rows("scroll-depth", fixtures::scroll_rows());
    let server = ctx.server();

    let table: RenderedPage = server.get("/pages/scroll-depth/table").await.json();
    let csv = server.get("/pages/scroll-depth/export.csv").await.text();
    let exported = FormattedTable::from_csv(&csv).unwrap();

    assert_eq!(exported, table.table);
    assert_eq!(
        exported.header,
        vec!["Dates", "Total Users", "Interacted Users", "Bounce%", "≥20%", "≥40%", "≥60%", "≥80%", "100%"]
    );
    assert_eq!(
        exported.rows[0],
        vec!["2024-03-02", "1", "1", "0.00%", "100.00%", "100.00%", "0.00%", "0.00%", "0.00%"]
    );
    assert_eq!(
        exported.rows[1],
        vec!["2024-03-01", "2", "1", "50.00%", "50.00%", "50.00%", "50.00%", "50.00%", "50.00%"]
    );
}

#[tokio::test]
async fn test_empty_export_keeps_header() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let csv = server.get("/pages/android-overview/export.csv").await.text();
    let exported = FormattedTable::from_csv(&csv).unwrap();

    assert!(exported.rows.is_empty());
    assert_eq!(exported.header[0], "Dates");
    assert!(exported.header.iter().any(|h| h == "Total Users"));
}
