//! ClickHouse client wrapper.

use crate::config::WarehouseConfig;
use clickhouse::Client;
use dashboard_core::{Error, Result, WarehouseErrorCode};
use tracing::info;

/// ClickHouse client configured for read-only dashboard queries.
#[derive(Clone)]
pub struct WarehouseClient {
    inner: Client,
    config: WarehouseConfig,
}

impl WarehouseClient {
    /// Creates a new client. No connection is made until the first query.
    pub fn new(config: WarehouseConfig) -> Result<Self> {
        if config.url.trim().is_empty() {
            return Err(Error::validation("warehouse url must not be empty"));
        }

        let mut client = Client::default()
            .with_url(&config.url)
            .with_database(&config.database)
            .with_option("readonly", "1")
            .with_option("max_execution_time", config.timeout_secs.to_string());

        if let Some(ref user) = config.username {
            client = client.with_user(user);
        }

        if let Some(ref pass) = config.password {
            client = client.with_password(pass);
        }

        info!(
            url = %config.url,
            database = %config.database,
            timeout_secs = config.timeout_secs,
            "Created warehouse client"
        );

        Ok(Self {
            inner: client,
            config,
        })
    }

    /// Returns the inner clickhouse client.
    pub fn inner(&self) -> &Client {
        &self.inner
    }

    /// Returns the configuration.
    pub fn config(&self) -> &WarehouseConfig {
        &self.config
    }
}

/// Maps a clickhouse client error onto a coded warehouse error.
pub fn classify_error(err: clickhouse::error::Error) -> Error {
    use clickhouse::error::Error as ChError;

    match err {
        ChError::Network(e) => Error::warehouse(WarehouseErrorCode::Connection, e.to_string()),
        ChError::TimedOut => Error::warehouse(WarehouseErrorCode::Timeout, "warehouse request timed out"),
        ChError::BadResponse(msg) if is_auth_failure(&msg) => {
            Error::warehouse(WarehouseErrorCode::Connection, msg).permanent()
        }
        ChError::BadResponse(msg) => Error::warehouse(WarehouseErrorCode::QueryFailed, msg),
        other => Error::warehouse(WarehouseErrorCode::QueryFailed, other.to_string()),
    }
}

fn is_auth_failure(msg: &str) -> bool {
    msg.contains("AUTHENTICATION_FAILED") || msg.contains("Code: 516") || msg.contains("Code: 192")
}
