//! API server configuration.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! | Variable                       | Default            |
//! |--------------------------------|--------------------|
//! | `PARKING_BIND_ADDR`            | `0.0.0.0:8080`     |
//! | `PARKING_DB_PATH`              | `parking_base.db`  |
//! | `PARKING_DB_MAX_CONNECTIONS`   | `5`                |
//! | `PARKING_STAY_ESTIMATE_HOURS`  | `5`                |

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use parking_core::{StayEstimate, DEFAULT_STAY_ESTIMATE_HOURS};

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Address the HTTP listener binds to
    pub bind_addr: SocketAddr,

    /// SQLite database file
    pub db_path: PathBuf,

    /// Pool size
    pub db_max_connections: u32,

    /// Provisional stay written as `time_out` on entry
    pub stay_estimate: StayEstimate,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// `load()` passes the process environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = lookup("PARKING_BIND_ADDR")
            .unwrap_or_else(|| "0.0.0.0:8080".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("PARKING_BIND_ADDR".to_string()))?;

        let db_path = lookup("PARKING_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("parking_base.db"));

        let db_max_connections: u32 = lookup("PARKING_DB_MAX_CONNECTIONS")
            .unwrap_or_else(|| "5".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("PARKING_DB_MAX_CONNECTIONS".to_string()))?;
        if db_max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "PARKING_DB_MAX_CONNECTIONS".to_string(),
            ));
        }

        let stay_hours: i64 = lookup("PARKING_STAY_ESTIMATE_HOURS")
            .unwrap_or_else(|| DEFAULT_STAY_ESTIMATE_HOURS.to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("PARKING_STAY_ESTIMATE_HOURS".to_string()))?;
        let stay_estimate = StayEstimate::from_hours(stay_hours)
            .map_err(|_| ConfigError::InvalidValue("PARKING_STAY_ESTIMATE_HOURS".to_string()))?;

        Ok(ApiConfig {
            bind_addr,
            db_path,
            db_max_connections,
            stay_estimate,
        })
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ApiConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.db_path, PathBuf::from("parking_base.db"));
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.stay_estimate, StayEstimate::default());
    }

    #[test]
    fn test_overrides() {
        let config = ApiConfig::from_lookup(lookup(&[
            ("PARKING_BIND_ADDR", "127.0.0.1:3000"),
            ("PARKING_DB_PATH", "/tmp/p.db"),
            ("PARKING_DB_MAX_CONNECTIONS", "12"),
            ("PARKING_STAY_ESTIMATE_HOURS", "2"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(config.db_path, PathBuf::from("/tmp/p.db"));
        assert_eq!(config.db_max_connections, 12);
        assert_eq!(config.stay_estimate.hours(), 2);
    }

    #[test]
    fn test_invalid_values() {
        for (key, value) in [
            ("PARKING_BIND_ADDR", "not an address"),
            ("PARKING_DB_MAX_CONNECTIONS", "0"),
            ("PARKING_DB_MAX_CONNECTIONS", "many"),
            ("PARKING_STAY_ESTIMATE_HOURS", "0"),
            ("PARKING_STAY_ESTIMATE_HOURS", "-3"),
        ] {
            let err = ApiConfig::from_lookup(lookup(&[(key, value)])).unwrap_err();
            assert_eq!(err.to_string(), format!("Invalid value for {key}"));
        }
    }
}
