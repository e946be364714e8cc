//! Warehouse health checks.

use crate::executor::QueryExecutor;
use telemetry::health;
use tracing::{debug, error};

/// Pings the warehouse and records the outcome in the health registry.
pub async fn check_connection(executor: &dyn QueryExecutor) -> bool {
    match executor.ping().await {
        Ok(()) => {
            health().warehouse.set_healthy();
            debug!(backend = executor.backend(), "Warehouse connection healthy");
            true
        }
        Err(e) => {
            health().warehouse.set_unhealthy(e.to_string());
            error!(backend = executor.backend(), error = %e, "Warehouse health check failed");
            false
        }
    }
}
