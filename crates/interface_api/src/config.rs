//! API configuration
//!
//! Values come from `API_`-prefixed environment variables layered over the
//! defaults below. `DATABASE_URL` is honoured when `API_DATABASE_URL` is not
//! set.

use chrono::NaiveDate;
use serde::Deserialize;

use core_kernel::Timezone;

/// Where the ports are backed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    /// In-memory adapters; data is lost on restart
    Memory,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database URL
    pub database_url: String,
    /// Log level, overridden by `RUST_LOG`
    pub log_level: String,
    pub log_format: LogFormat,
    pub storage: StorageBackend,
    /// Timezone that decides what "today" is
    pub timezone: Timezone,
    /// Earliest date accepted at the HTTP boundary
    pub min_claim_date: NaiveDate,
    /// Latest accepted date, in years after today
    pub max_years_ahead: u32,
    /// Seconds between expired-policy scans
    pub expiry_check_interval_secs: u64,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    /// Seconds to wait for a pooled connection
    pub db_acquire_timeout_secs: u64,
}

const DEFAULT_DATABASE_URL: &str = "postgres://localhost/car_insurance";

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            storage: StorageBackend::Postgres,
            timezone: Timezone::default(),
            min_claim_date: NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or(NaiveDate::MIN),
            max_years_ahead: 50,
            expiry_check_interval_secs: 30 * 60,
            db_max_connections: 10,
            db_min_connections: 2,
            db_acquire_timeout_secs: 30,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        config::Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 8080)?
            .set_default("database_url", database_url)?
            .set_default("log_level", "info")?
            .set_default("log_format", "pretty")?
            .set_default("storage", "postgres")?
            .set_default("timezone", "UTC")?
            .set_default("min_claim_date", "1900-01-01")?
            .set_default("max_years_ahead", 50)?
            .set_default("expiry_check_interval_secs", 30 * 60)?
            .set_default("db_max_connections", 10)?
            .set_default("db_min_connections", 2)?
            .set_default("db_acquire_timeout_secs", 30)?
            .add_source(config::Environment::with_prefix("API").try_parsing(true))
            .build()?
            .try_deserialize::<Self>()?
            .validated()
    }

    /// Rejects values the server cannot run with
    pub fn validated(self) -> Result<Self, config::ConfigError> {
        if self.expiry_check_interval_secs == 0 {
            return Err(config::ConfigError::Message(
                "expiry_check_interval_secs must be at least 1".to_string(),
            ));
        }
        if self.db_max_connections == 0 {
            return Err(config::ConfigError::Message(
                "db_max_connections must be at least 1".to_string(),
            ));
        }
        if self.db_min_connections > self.db_max_connections {
            return Err(config::ConfigError::Message(format!(
                "db_min_connections ({}) exceeds db_max_connections ({})",
                self.db_min_connections, self.db_max_connections
            )));
        }
        Ok(self)
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();

        assert_eq!(config.server_addr(), "0.0.0.0:8080");
        assert_eq!(config.storage, StorageBackend::Postgres);
        assert_eq!(config.min_claim_date, NaiveDate::from_ymd_opt(1900, 1, 1).unwrap());
        assert_eq!(config.max_years_ahead, 50);
        assert_eq!(config.expiry_check_interval_secs, 1800);
        assert_eq!(config.db_min_connections, 2);
        assert_eq!(config.db_acquire_timeout_secs, 30);
        assert!(config.validated().is_ok());
    }

    #[test]
    fn test_zero_expiry_interval_is_rejected() {
        let config = ApiConfig {
            expiry_check_interval_secs: 0,
            ..ApiConfig::default()
        };

        let err = config.validated().unwrap_err();
        assert!(err.to_string().contains("expiry_check_interval_secs"));
    }

    #[test]
    fn test_pool_bounds_are_checked() {
        let inverted = ApiConfig {
            db_min_connections: 20,
            db_max_connections: 5,
            ..ApiConfig::default()
        };
        assert!(inverted.validated().is_err());

        let empty = ApiConfig {
            db_min_connections: 0,
            db_max_connections: 0,
            ..ApiConfig::default()
        };
        assert!(empty.validated().is_err());
    }

    #[test]
    fn test_deserialize_from_values() {
        let config: ApiConfig = serde_json::from_value(serde_json::json!({
            "host": "127.0.0.1",
            "port": 9000,
            "database_url": "postgres://db/cars",
            "log_level": "debug",
            "log_format": "json",
            "storage": "memory",
            "timezone": "Europe/Bucharest",
            "min_claim_date": "1950-01-01",
            "max_years_ahead": 10,
            "expiry_check_interval_secs": 60,
            "db_max_connections": 4,
            "db_min_connections": 1,
            "db_acquire_timeout_secs": 5
        }))
        .unwrap();

        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.timezone, "Europe/Bucharest".parse().unwrap());
        assert_eq!(config.db_acquire_timeout_secs, 5);
    }
}
