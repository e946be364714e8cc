//! ClickHouse query execution and result caching for the dashboard pages.

pub mod cache;
pub mod client;
pub mod config;
pub mod executor;
pub mod health;
pub mod rows;

pub use cache::QueryCache;
pub use client::WarehouseClient;
pub use config::WarehouseConfig;
pub use executor::{ensure_read_only, ClickHouseExecutor, QueryExecutor, RetryPolicy};
pub use rows::WarehouseRow;
