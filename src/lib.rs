pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod infra;
pub mod state;
pub mod background;

use std::sync::Arc;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};
use crate::api::router::create_router;
use crate::background::start_background_worker;
use crate::config::Config;
use crate::error::AppError;
use crate::infra::factory::bootstrap_state;

const LOG_DIR: &str = "./logs";
const LOG_FILE: &str = "sipinjam.log";

/// Pretty console output filtered by `RUST_LOG`, plus a daily JSON file with
/// debug detail for this crate. Keep the guard alive for the file writer.
pub fn init_logging() -> WorkerGuard {
    let (file_writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::daily(LOG_DIR, LOG_FILE));

    let console = tracing_subscriber::fmt::layer()
        .pretty()
        .with_target(false)
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()));

    let json_file = tracing_subscriber::fmt::layer()
        .json()
        .with_target(true)
        .with_writer(file_writer)
        .with_filter(EnvFilter::new("info,sipinjam=debug"));

    tracing_subscriber::registry().with(console).with(json_file).init();

    info!(dir = LOG_DIR, "Logging initialized");
    guard
}

pub async fn run() -> Result<(), AppError> {
    let _guard = init_logging();

    let config = Config::from_env();
    let state = Arc::new(bootstrap_state(&config).await);

    tokio::spawn(start_background_worker(state.clone()));

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Internal(format!("cannot bind {}: {}", addr, e)))?;

    info!("SIPINJAM listening on {}", addr);
    axum::serve(listener, create_router(state))
        .await
        .map_err(|e| AppError::Internal(format!("server stopped: {}", e)))
}
