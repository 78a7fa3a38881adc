use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub session_ttl_hours: i64,
    pub lifecycle_sweep_secs: u64,
    pub seed_defaults: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://sipinjam.db".to_string()),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            session_ttl_hours: env::var("SESSION_TTL_HOURS").unwrap_or_else(|_| "12".to_string()).parse().expect("SESSION_TTL_HOURS must be a number"),
            lifecycle_sweep_secs: env::var("LIFECYCLE_SWEEP_SECS").unwrap_or_else(|_| "60".to_string()).parse().expect("LIFECYCLE_SWEEP_SECS must be a number"),
            seed_defaults: env::var("SEED_DEFAULTS").map(|v| v != "false" && v != "0").unwrap_or(true),
        }
    }
}
