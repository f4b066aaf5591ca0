//! Car Insurance API - Server Binary
//!
//! # Usage
//!
//! ```bash
//! # Postgres storage, migrations and seed data applied on startup
//! DATABASE_URL=postgres://localhost/car_insurance cargo run --bin car-insurance-api
//!
//! # In-memory storage
//! API_STORAGE=memory API_LOG_FORMAT=json cargo run --bin car-insurance-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` / `API_PORT` - Bind address (default: 0.0.0.0:8080)
//! * `DATABASE_URL` or `API_DATABASE_URL` - PostgreSQL connection string
//! * `API_STORAGE` - `postgres` or `memory` (default: postgres)
//! * `API_LOG_LEVEL` - Log filter when `RUST_LOG` is unset (default: info)
//! * `API_LOG_FORMAT` - `pretty` or `json` (default: pretty)
//! * `API_TIMEZONE` - IANA zone used for "today" (default: UTC)
//! * `API_EXPIRY_CHECK_INTERVAL_SECS` - Expired policy scan period, at least 1 (default: 1800)
//! * `API_DB_MAX_CONNECTIONS` / `API_DB_MIN_CONNECTIONS` - Pool bounds (default: 10 / 2)
//! * `API_DB_ACQUIRE_TIMEOUT_SECS` - Wait for a pooled connection (default: 30)

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use infra_db::{create_pool, run_migrations, DatabaseConfig};
use interface_api::config::{ApiConfig, LogFormat, StorageBackend};
use interface_api::scheduler::spawn_expiry_monitor;
use interface_api::{create_router, AppPorts, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().context("invalid API configuration")?;
    init_tracing(&config);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        storage = ?config.storage,
        timezone = %config.timezone.0,
        "Starting car insurance API"
    );

    let ports = build_ports(&config).await?;

    let monitor = spawn_expiry_monitor(
        ports.expiry_monitor(),
        config.timezone,
        Duration::from_secs(config.expiry_check_interval_secs),
    );

    let app = create_router(AppState::new(ports, config.clone()));

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("invalid bind address {}", config.server_addr()))?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    monitor.abort();
    tracing::info!("Server shutdown complete");
    Ok(())
}

fn init_tracing(config: &ApiConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    match config.log_format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init(),
    }
}

async fn build_ports(config: &ApiConfig) -> anyhow::Result<AppPorts> {
    match config.storage {
        StorageBackend::Postgres => {
            tracing::info!("Connecting to database...");
            let pool = create_pool(
                DatabaseConfig::new(&config.database_url)
                    .max_connections(config.db_max_connections)
                    .min_connections(config.db_min_connections)
                    .acquire_timeout(Duration::from_secs(config.db_acquire_timeout_secs)),
            )
            .await
            .context("failed to connect to database")?;

            run_migrations(&pool).await.context("failed to run migrations")?;
            tracing::info!("Database ready");

            Ok(AppPorts::postgres(pool))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on shutdown");
            Ok(AppPorts::in_memory())
        }
    }
}

/// Waits for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
