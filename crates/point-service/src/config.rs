//! Service configuration.

use std::fmt;
use std::str::FromStr;

/// Which store backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// Process-local maps. Lost on restart.
    Memory,
    /// `RocksDB` under `data_dir`. Needs the `rocksdb-backend` feature.
    RocksDb,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "rocksdb" => Ok(Self::RocksDb),
            other => Err(ConfigError::UnknownBackend(other.to_string())),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => f.write_str("memory"),
            Self::RocksDb => f.write_str("rocksdb"),
        }
    }
}

/// Errors raised while loading configuration or opening the store.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `STORAGE_BACKEND` named something we do not know.
    #[error("unknown storage backend: {0}")]
    UnknownBackend(String),

    /// The backend exists but was not compiled into this binary.
    #[error("storage backend `{0}` is not available in this build")]
    BackendUnavailable(StorageBackend),

    /// A numeric setting did not parse.
    #[error("invalid value for {name}: {value}")]
    InvalidValue {
        /// Environment variable name.
        name: &'static str,
        /// The rejected value.
        value: String,
    },

    /// The store could not be opened.
    #[error(transparent)]
    Storage(#[from] point_store::StoreError),
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address to listen on (default: "0.0.0.0:8080").
    pub listen_addr: String,

    /// Storage backend (default: memory).
    pub storage_backend: StorageBackend,

    /// Path to the `RocksDB` data directory (default: "/data/point-ledger").
    pub data_dir: String,

    /// CORS allowed origins.
    pub cors_origins: Vec<String>,

    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,

    /// Request timeout in seconds.
    pub request_timeout_seconds: u64,
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to a value that does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to a value that does not parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            listen_addr: lookup("LISTEN_ADDR").unwrap_or(defaults.listen_addr),
            storage_backend: lookup("STORAGE_BACKEND")
                .map(|s| s.parse::<StorageBackend>())
                .transpose()?
                .unwrap_or(defaults.storage_backend),
            data_dir: lookup("DATA_DIR").unwrap_or(defaults.data_dir),
            cors_origins: lookup("CORS_ORIGINS").map_or(defaults.cors_origins, |s| {
                s.split(',').map(|o| o.trim().to_string()).collect()
            }),
            max_body_bytes: parse_var(&lookup, "MAX_BODY_BYTES")?
                .unwrap_or(defaults.max_body_bytes),
            request_timeout_seconds: parse_var(&lookup, "REQUEST_TIMEOUT_SECONDS")?
                .unwrap_or(defaults.request_timeout_seconds),
        })
    }
}

fn parse_var<F, T>(lookup: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(name)
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue { name, value })
        })
        .transpose()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".into(),
            storage_backend: StorageBackend::Memory,
            data_dir: "/data/point-ledger".into(),
            cors_origins: vec!["*".into()],
            max_body_bytes: 64 * 1024,
            request_timeout_seconds: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<ServiceConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ServiceConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.listen_addr, "0.0.0.0:8080");
        assert_eq!(config.storage_backend, StorageBackend::Memory);
        assert_eq!(config.cors_origins, vec!["*".to_string()]);
        assert_eq!(config.request_timeout_seconds, 30);
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("LISTEN_ADDR", "127.0.0.1:9000"),
            ("STORAGE_BACKEND", "RocksDB"),
            ("DATA_DIR", "/tmp/points"),
            ("CORS_ORIGINS", "http://a.test, http://b.test"),
            ("MAX_BODY_BYTES", "1024"),
        ])
        .unwrap();

        assert_eq!(config.listen_addr, "127.0.0.1:9000");
        assert_eq!(config.storage_backend, StorageBackend::RocksDb);
        assert_eq!(config.data_dir, "/tmp/points");
        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);
        assert_eq!(config.max_body_bytes, 1024);
    }

    #[test]
    fn rejects_unknown_backend() {
        assert!(matches!(
            config_from(&[("STORAGE_BACKEND", "postgres")]),
            Err(ConfigError::UnknownBackend(name)) if name == "postgres"
        ));
    }

    #[test]
    fn rejects_bad_number() {
        assert!(matches!(
            config_from(&[("REQUEST_TIMEOUT_SECONDS", "soon")]),
            Err(ConfigError::InvalidValue {
                name: "REQUEST_TIMEOUT_SECONDS",
                ..
            })
        ));
    }
}
