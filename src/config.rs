use anyhow::Context;
use std::env;
use std::str::FromStr;

/// `DATABASE_URL` value that selects the in-memory store.
pub const MEMORY_DATABASE: &str = "memory";

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    pub database_url: String,
    pub db_max_connections: u32,
    pub api_prefix: String,

    // Logging
    pub log_dir: String,
    pub log_level: tracing::Level,

    // Rate limiting, per peer IP
    pub rate_per_min: u32,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            server_addr: env::var("SERVER_ADDR").context("SERVER_ADDR must be set")?,
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            db_max_connections: parse_or("DB_MAX_CONNECTIONS", 10)?,
            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string()),
            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string()),
            log_level: parse_or("LOG_LEVEL", tracing::Level::DEBUG)?,
            rate_per_min: parse_or("RATE_PER_MIN", 600)?,
        })
    }

    pub fn uses_memory_store(&self) -> bool {
        self.database_url == MEMORY_DATABASE
    }
}

fn parse_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_or_falls_back_when_unset() {
        let value: u32 = parse_or("HRM_STORE_TEST_UNSET_VAR", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn memory_url_selects_memory_store() {
        let config = Config {
            server_addr: "127.0.0.1:8080".into(),
            database_url: MEMORY_DATABASE.into(),
            db_max_connections: 10,
            api_prefix: "/api".into(),
            log_dir: "logs".into(),
            log_level: tracing::Level::INFO,
            rate_per_min: 600,
        };
        assert!(config.uses_memory_store());

        let config = Config {
            database_url: "mysql://hr:hr@localhost/hr".into(),
            ..config
        };
        assert!(!config.uses_memory_store());
    }
}
