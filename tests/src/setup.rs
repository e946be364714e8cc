//! Common test setup functions.

use api::{router, AppState};
use axum::Router;
use axum_test::TestServer;
use dashboard_core::{catalog, EventRow};
use std::sync::Arc;
use warehouse_client::QueryExecutor;

use crate::mocks::MockExecutor;

/// Test context with an in-memory warehouse behind the real router.
pub struct TestContext {
    pub executor: Arc<MockExecutor>,
    pub router: Router,
}

impl TestContext {
    pub fn new() -> Self {
        let executor = Arc::new(MockExecutor::new());
        let state = AppState::new(executor.clone() as Arc<dyn QueryExecutor>, 16);
        let router = router(state);

        Self { executor, router }
    }

    /// Serve `rows` for the query of the page named `slug`.
    pub fn with_page_rows(self, slug: &str, rows: Vec<EventRow>) -> Self {
        let page = catalog::find(slug).expect("unknown page slug");
        self.executor.set_rows(page.query, rows);
        self
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(self.router.clone()).expect("Failed to create test server")
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
