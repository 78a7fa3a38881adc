use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{ConnectOptions, SqlitePool};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::error::AppError;
use crate::state::AppState;
use crate::domain::services::{
    auth_service::AuthService, booking_service::BookingService, defaults::seed_if_empty,
};
use crate::infra::repositories::{
    sqlite_booking_repo::SqliteBookingRepo, sqlite_deactivation_repo::SqliteDeactivationRepo,
    sqlite_equipment_repo::SqliteEquipmentRepo, sqlite_room_repo::SqliteRoomRepo,
    sqlite_session_repo::SqliteSessionRepo, sqlite_user_repo::SqliteUserRepo,
};

pub async fn bootstrap_state(config: &Config) -> AppState {
    info!("Initializing SQLite connection with WAL Mode...");

    let pool = connect_sqlite(&config.database_url)
        .await
        .expect("Failed to connect to SQLite");

    run_sqlite_migrations(&pool)
        .await
        .expect("Failed to run SQLite migrations");

    let state = build_state(config, pool);

    if config.seed_defaults {
        seed_if_empty(&state).await.expect("Failed to seed default data");
    }

    state
}

pub async fn connect_sqlite(database_url: &str) -> Result<SqlitePool, AppError> {
    let opts = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
        .log_statements(LevelFilter::Debug)
        .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(opts)
        .await?;
    Ok(pool)
}

pub async fn run_sqlite_migrations(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations/sqlite").run(pool).await?;
    Ok(())
}

/// Wires every repository and service onto one pool.
pub fn build_state(config: &Config, pool: SqlitePool) -> AppState {
    let user_repo = Arc::new(SqliteUserRepo::new(pool.clone()));
    let room_repo = Arc::new(SqliteRoomRepo::new(pool.clone()));
    let equipment_repo = Arc::new(SqliteEquipmentRepo::new(pool.clone()));
    let booking_repo = Arc::new(SqliteBookingRepo::new(pool.clone()));

    let auth_service = Arc::new(AuthService::new(Arc::new(SqliteSessionRepo::new(pool.clone())), user_repo.clone(), config.session_ttl_hours));
    let booking_service = Arc::new(BookingService::new(booking_repo.clone(), room_repo.clone(), equipment_repo.clone()));

    AppState {
        config: config.clone(),
        user_repo,
        deactivation_repo: Arc::new(SqliteDeactivationRepo::new(pool)),
        room_repo,
        equipment_repo,
        booking_repo,
        auth_service,
        booking_service,
    }
}
