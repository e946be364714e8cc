//! Analytics Dashboard Service
//!
//! Serves date-indexed dashboard tables built from warehouse event data:
//! - Per-page read-only ClickHouse queries with a shared result cache
//! - Filter, pivot and percentage pipeline per page
//! - JSON tables and CSV exports over HTTP

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info, warn};

use api::{router, AppState};
use telemetry::init_tracing_from_env;
use warehouse_client::{health::check_connection, ClickHouseExecutor, WarehouseClient, WarehouseConfig};

/// Application configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct Config {
    #[serde(default = "default_host")]
    host: String,
    #[serde(default = "default_port")]
    port: u16,

    #[serde(default)]
    warehouse: WarehouseConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            warehouse: WarehouseConfig::default(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing_from_env();

    info!("Starting Dashboard Service v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config()?;
    info!(
        url = %config.warehouse.url,
        database = %config.warehouse.database,
        cache_max_capacity = config.warehouse.cache_max_capacity,
        "Loaded warehouse config"
    );

    let client =
        WarehouseClient::new(config.warehouse.clone()).context("Failed to create warehouse client")?;
    let executor = Arc::new(ClickHouseExecutor::new(client));

    // Pages report errors per request, so an unreachable warehouse is not fatal here.
    if !check_connection(executor.as_ref()).await {
        warn!("Warehouse unreachable at startup, pages will fail until it recovers");
    }

    let state = AppState::new(executor, config.warehouse.cache_max_capacity);
    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("Invalid server address")?;

    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shutdown complete");
    Ok(())
}

/// Load configuration from files and environment.
fn load_config() -> Result<Config> {
    let config = config::Config::builder()
        .add_source(config::Config::try_from(&Config::default())?)
        .add_source(
            config::File::with_name("config/default")
                .required(false)
                .format(config::FileFormat::Toml),
        )
        .add_source(
            config::Environment::default()
                .separator("__")
                .prefix("DASHBOARD")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build configuration")?;

    let mut config: Config = config
        .try_deserialize()
        .context("Failed to deserialize configuration")?;

    // Flat names for the nested warehouse section
    if let Ok(url) = std::env::var("DASHBOARD_WAREHOUSE_URL") {
        config.warehouse.url = url;
    }
    if let Ok(database) = std::env::var("DASHBOARD_WAREHOUSE_DATABASE") {
        config.warehouse.database = database;
    }
    if let Ok(username) = std::env::var("DASHBOARD_WAREHOUSE_USERNAME") {
        config.warehouse.username = Some(username);
    }
    if let Ok(password) = std::env::var("DASHBOARD_WAREHOUSE_PASSWORD") {
        config.warehouse.password = Some(password);
    }

    Ok(config)
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install terminate handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        }
        _ = terminate => {
            info!("Received terminate signal");
        }
    }
}
