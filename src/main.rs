//! Drivebox Server — file-storage web service backend
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use drivebox_api::state::AppState;
use drivebox_core::config::AppConfig;
use drivebox_core::error::AppError;
use drivebox_core::traits::object_store::ObjectStore;
use drivebox_database::ItemStore;
use drivebox_storage::{LocalObjectStore, S3ObjectStore};

#[tokio::main]
async fn main() {
    let env = std::env::var("DRIVEBOX_ENV").unwrap_or_else(|_| "development".to_string());
    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Drivebox v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db_pool = drivebox_database::connection::create_pool(&config.database).await?;
    drivebox_database::migration::run_migrations(&db_pool).await?;

    let store: Arc<dyn ItemStore> = Arc::new(drivebox_database::PgItemStore::new(db_pool));

    // ── Step 2: Object storage provider ──────────────────────────
    tracing::info!(provider = %config.storage.provider, "Initializing object store");
    let mut local_objects = None;
    let object_store: Arc<dyn ObjectStore> = match config.storage.provider.as_str() {
        "s3" => Arc::new(S3ObjectStore::new(&config.storage.s3).await?),
        "local" => {
            let local = Arc::new(LocalObjectStore::new(&config.storage.local).await?);
            local_objects = Some(Arc::clone(&local));
            local
        }
        other => {
            return Err(AppError::configuration(format!(
                "Unknown storage provider '{other}' (expected 'local' or 's3')"
            )));
        }
    };

    // ── Step 3: Application state + router ───────────────────────
    let config = Arc::new(config);
    let state = AppState::new(
        Arc::clone(&config),
        store,
        object_store,
        local_objects,
    );
    let router = drivebox_api::build_router(state);

    // ── Step 4: Serve ────────────────────────────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::with_source(
            drivebox_core::error::ErrorKind::Configuration,
            format!("Failed to bind {addr}"),
            e,
        ))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Resolve when the process receives SIGINT.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }
    tracing::info!("Shutdown signal received");
}
