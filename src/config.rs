use std::env;
use std::fmt::Display;
use std::str::FromStr;

/// Runtime settings, read once at start-up.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Postgres URL. When unset the in-memory store is used.
    pub database_url: Option<String>,
    pub bind_addr: String,
    pub db_max_connections: u32,
    pub http_workers: Option<usize>,
    pub max_sleep_secs: u64,
    pub seed_demo_data: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            bind_addr: "127.0.0.1:8080".to_string(),
            db_max_connections: 5,
            http_workers: None,
            max_sleep_secs: 60,
            seed_demo_data: true,
        }
    }
}

impl AppConfig {
    /// Load from the process environment, after applying any `.env` file.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Missing or invalid values
    /// fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            database_url: lookup("DATABASE_URL").filter(|v| !v.trim().is_empty()),
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", defaults.db_max_connections),
            http_workers: lookup("HTTP_WORKERS")
                .and_then(|v| parse_value("HTTP_WORKERS", &v))
                .filter(|n: &usize| *n > 0),
            max_sleep_secs: parse_or(&lookup, "MAX_SLEEP_SECS", defaults.max_sleep_secs),
            seed_demo_data: parse_or(&lookup, "SEED_DEMO_DATA", defaults.seed_demo_data),
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => parse_value(key, &raw).unwrap_or(default),
        None => {
            log::debug!("{key} not set, using default: {default}");
            default
        }
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Option<T>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim()
        .parse()
        .map_err(|e| log::warn!("Invalid {key} value {raw:?}: {e}, using default"))
        .ok()
}
