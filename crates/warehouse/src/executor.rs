//! Query execution with timeouts and bounded retries.

use std::future::Future;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashboard_core::{Error, EventRow, Result, WarehouseErrorCode};
use telemetry::metrics;
use tracing::{debug, warn};

use crate::client::{classify_error, WarehouseClient};
use crate::rows::{convert_rows, WarehouseRow};

/// Runs page queries against a warehouse.
///
/// Implemented by [`ClickHouseExecutor`] in production and by mocks in tests.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Executes a read-only query and returns its rows.
    async fn fetch_rows(&self, query: &str) -> Result<Vec<EventRow>>;

    /// Cheap round trip used by health checks.
    async fn ping(&self) -> Result<()>;

    /// Backend name for logs.
    fn backend(&self) -> &'static str;
}

/// Rejects anything but `SELECT`/`WITH` statements.
pub fn ensure_read_only(query: &str) -> Result<()> {
    let head: String = query
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect();

    if head.eq_ignore_ascii_case("SELECT") || head.eq_ignore_ascii_case("WITH") {
        Ok(())
    } else {
        Err(Error::validation(format!(
            "only SELECT or WITH queries may be sent to the warehouse, got '{}'",
            head
        )))
    }
}

/// Timeout and retry settings for one query.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Limit for each attempt
    pub timeout: Duration,
    /// Attempts after the first one
    pub max_retries: u32,
    /// Delay before retry `n` is `backoff * n`
    pub backoff: Duration,
}

impl RetryPolicy {
    /// Runs `attempt` until it succeeds, fails permanently or retries run out.
    pub async fn run<T, F, Fut>(&self, mut attempt: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut retries = 0u32;
        loop {
            let outcome = match tokio::time::timeout(self.timeout, attempt()).await {
                Ok(result) => result,
                Err(_) => Err(Error::warehouse(
                    WarehouseErrorCode::Timeout,
                    format!("query exceeded {}s", self.timeout.as_secs_f64()),
                )),
            };

            match outcome {
                Ok(value) => return Ok(value),
                Err(e) if e.is_transient() && retries < self.max_retries => {
                    retries += 1;
                    metrics().query_retries.inc();
                    let delay = self.backoff * retries;
                    warn!(
                        error = %e,
                        retry = retries,
                        max_retries = self.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        "Warehouse query failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// [`QueryExecutor`] backed by ClickHouse.
#[derive(Clone)]
pub struct ClickHouseExecutor {
    client: WarehouseClient,
    policy: RetryPolicy,
}

impl ClickHouseExecutor {
    pub fn new(client: WarehouseClient) -> Self {
        let config = client.config();
        let policy = RetryPolicy {
            timeout: config.timeout(),
            max_retries: config.max_retries,
            backoff: config.retry_backoff(),
        };
        Self { client, policy }
    }
}

#[async_trait]
impl QueryExecutor for ClickHouseExecutor {
    async fn fetch_rows(&self, query: &str) -> Result<Vec<EventRow>> {
        ensure_read_only(query)?;

        let started = Instant::now();
        metrics().queries_executed.inc();

        let client = &self.client;
        let result = self
            .policy
            .run(move || async move {
                client
                    .inner()
                    .query(query)
                    .fetch_all::<WarehouseRow>()
                    .await
                    .map_err(classify_error)
            })
            .await;

        let elapsed_ms = started.elapsed().as_millis() as u64;
        metrics().query_latency_ms.observe(elapsed_ms);

        match result {
            Ok(rows) => {
                debug!(rows = rows.len(), elapsed_ms, "Warehouse query finished");
                Ok(convert_rows(rows))
            }
            Err(e) => {
                metrics().query_errors.inc();
                Err(e)
            }
        }
    }

    async fn ping(&self) -> Result<()> {
        self.client
            .inner()
            .query("SELECT 1")
            .fetch_one::<u8>()
            .await
            .map(|_| ())
            .map_err(classify_error)
    }

    fn backend(&self) -> &'static str {
        "clickhouse"
    }
}
