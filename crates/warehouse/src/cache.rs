//! Time-bounded cache of query results keyed by query text.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashboard_core::{Error, EventRow, Result};
use moka::future::Cache;
use moka::Expiry;
use telemetry::metrics;
use tracing::{debug, info};

/// Cached result set of one query.
#[derive(Clone)]
struct CachedRows {
    rows: Arc<[EventRow]>,
    ttl: Duration,
}

/// Expires each entry after the TTL it was loaded with.
struct LoadedTtl;

impl Expiry<String, CachedRows> for LoadedTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CachedRows,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// Shared query result cache.
///
/// Concurrent requests for the same query wait on a single load. Failed loads
/// are not stored, so the next request tries again.
#[derive(Clone)]
pub struct QueryCache {
    inner: Cache<String, CachedRows>,
}

impl QueryCache {
    pub fn new(max_capacity: u64) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(max_capacity)
                .expire_after(LoadedTtl)
                .build(),
        }
    }

    /// Returns cached rows for `query`, running `loader` on a miss.
    pub async fn get_or_load<F, Fut>(&self, query: &str, ttl: Duration, loader: F) -> Result<Arc<[EventRow]>>
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<Vec<EventRow>>> + Send,
    {
        if let Some(hit) = self.inner.get(query).await {
            metrics().cache_hits.inc();
            debug!(rows = hit.rows.len(), "Query cache hit");
            return Ok(hit.rows);
        }

        let entry = self
            .inner
            .try_get_with(query.to_string(), async move {
                metrics().cache_misses.inc();
                let started = Instant::now();
                let rows = loader().await?;
                info!(
                    rows = rows.len(),
                    ttl_secs = ttl.as_secs(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Loaded query into cache"
                );
                Ok::<_, Error>(CachedRows {
                    rows: rows.into(),
                    ttl,
                })
            })
            .await
            .map_err(unshare)?;

        metrics().cache_entries.set(self.inner.entry_count());
        Ok(entry.rows)
    }

    /// Drops every cached result.
    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }

    /// Runs pending maintenance and returns the number of live entries.
    pub async fn entry_count(&self) -> u64 {
        self.inner.run_pending_tasks().await;
        self.inner.entry_count()
    }
}

/// Recovers an owned error from the one shared with waiting callers.
fn unshare(err: Arc<Error>) -> Error {
    match Arc::try_unwrap(err) {
        Ok(err) => err,
        Err(shared) => match shared.as_ref() {
            Error::Warehouse {
                code,
                message,
                http_status,
                transient,
            } => Error::Warehouse {
                code: *code,
                message: message.clone(),
                http_status: *http_status,
                transient: *transient,
            },
            Error::Validation(msg) => Error::Validation(msg.clone()),
            Error::PageNotFound(slug) => Error::PageNotFound(slug.clone()),
            Error::Export(msg) => Error::Export(msg.clone()),
            other => Error::internal(other.to_string()),
        },
    }
}
