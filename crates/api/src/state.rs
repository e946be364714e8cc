//! Application state shared across handlers.

use std::sync::Arc;

use dashboard_core::{EventRow, PageDefinition, Result};
use tracing::debug;
use warehouse_client::{QueryCache, QueryExecutor};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Warehouse access (ClickHouse in production, mock in tests)
    pub executor: Arc<dyn QueryExecutor>,
    /// Query results shared by every page render
    pub cache: QueryCache,
}

impl AppState {
    pub fn new(executor: Arc<dyn QueryExecutor>, cache_capacity: u64) -> Self {
        Self {
            executor,
            cache: QueryCache::new(cache_capacity),
        }
    }

    /// Rows of a page's query, served from the cache while within its TTL.
    pub async fn load_rows(&self, page: &PageDefinition) -> Result<Arc<[EventRow]>> {
        let executor = self.executor.clone();
        let query = page.query;
        debug!(page = page.slug, backend = executor.backend(), "Loading page rows");

        self.cache
            .get_or_load(query, page.cache_ttl, move || async move {
                executor.fetch_rows(query).await
            })
            .await
    }
}
