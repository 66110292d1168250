//! Server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;
use std::path::PathBuf;

use sales_db::DbConfig;

/// HTTP server configuration.
///
/// | Variable                   | Default    |
/// |----------------------------|------------|
/// | `SALES_HOST`               | `0.0.0.0`  |
/// | `SALES_PORT`               | `8080`     |
/// | `SALES_DATABASE_PATH`      | `sales.db` |
/// | `SALES_DB_MAX_CONNECTIONS` | `5`        |
/// | `RUST_LOG`                 | `info`     |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Bind address
    pub host: String,

    /// Listen port
    pub port: u16,

    /// SQLite database file
    pub database_path: PathBuf,

    /// Pool size
    pub db_max_connections: u32,

    /// Tracing filter directive
    pub log_level: String,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ApiConfig::default();

        Ok(ApiConfig {
            host: lookup("SALES_HOST").unwrap_or(defaults.host),

            port: parse_or("SALES_PORT", &lookup, defaults.port)?,

            database_path: lookup("SALES_DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),

            db_max_connections: parse_or(
                "SALES_DB_MAX_CONNECTIONS",
                &lookup,
                defaults.db_max_connections,
            )?,

            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
        })
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Pool configuration for the sale database.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(self.database_path.clone()).max_connections(self.db_max_connections)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_path: PathBuf::from("sales.db"),
            db_max_connections: 5,
            log_level: "info".to_string(),
        }
    }
}

fn parse_or<T, F>(name: &str, lookup: &F, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(name.to_string())),
        None => Ok(default),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(load(&[]).unwrap(), ApiConfig::default());
        assert_eq!(ApiConfig::default().addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("SALES_HOST", "127.0.0.1"),
            ("SALES_PORT", "9000"),
            ("SALES_DATABASE_PATH", "/var/lib/sales/ledger.db"),
            ("SALES_DB_MAX_CONNECTIONS", "12"),
            ("RUST_LOG", "debug"),
        ])
        .unwrap();

        assert_eq!(config.addr(), "127.0.0.1:9000");
        assert_eq!(config.database_path, PathBuf::from("/var/lib/sales/ledger.db"));
        assert_eq!(config.db_config().max_connections, 12);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_bad_port_names_the_variable() {
        assert_eq!(
            load(&[("SALES_PORT", "eighty")]),
            Err(ConfigError::InvalidValue("SALES_PORT".to_string()))
        );
        assert_eq!(
            load(&[("SALES_DB_MAX_CONNECTIONS", "-1")]),
            Err(ConfigError::InvalidValue("SALES_DB_MAX_CONNECTIONS".to_string()))
        );
    }
}
