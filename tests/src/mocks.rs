//! Mock implementations for testing.

use async_trait::async_trait;
use dashboard_core::{Error, EventRow, Result, WarehouseErrorCode};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use warehouse_client::{ensure_read_only, QueryExecutor};

/// Mock executor that answers queries from memory.
///
/// This implements the same `QueryExecutor` trait as the ClickHouse executor,
/// so requests go through the real router, cache and page pipeline.
#[derive(Clone, Default)]
pub struct MockExecutor {
    /// Rows returned per query text.
    rows: Arc<Mutex<HashMap<String, Vec<EventRow>>>>,
    /// Simulate failures if set.
    failure: Arc<Mutex<Option<WarehouseErrorCode>>>,
    /// Number of `fetch_rows` calls.
    calls: Arc<AtomicUsize>,
}

impl MockExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rows returned for `query`.
    pub fn set_rows(&self, query: &str, rows: Vec<EventRow>) {
        self.rows.lock().insert(query.to_string(), rows);
    }

    /// Make every call fail with `code` (or succeed again with `None`).
    pub fn set_failure(&self, code: Option<WarehouseErrorCode>) {
        *self.failure.lock() = code;
    }

    /// Number of queries executed so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn check_failure(&self) -> Result<()> {
        match *self.failure.lock() {
            Some(code) => Err(Error::warehouse(code, "simulated warehouse failure")),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl QueryExecutor for MockExecutor {
    async fn fetch_rows(&self, query: &str) -> Result<Vec<EventRow>> {
        ensure_read_only(query)?;
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;

        Ok(self.rows.lock().get(query).cloned().unwrap_or_default())
    }

    async fn ping(&self) -> Result<()> {
        self.check_failure()
    }

    fn backend(&self) -> &'static str {
        "mock"
    }
}
