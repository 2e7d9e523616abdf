//! Application state.

use std::sync::Arc;

use point_store::{LedgerStore, MemoryStore};

use crate::config::{ConfigError, ServiceConfig, StorageBackend};
use crate::service::PointService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The point service.
    pub service: Arc<PointService>,

    /// Service configuration.
    pub config: ServiceConfig,
}

impl AppState {
    /// Create a new application state over an opened store.
    #[must_use]
    pub fn new(store: Arc<dyn LedgerStore>, config: ServiceConfig) -> Self {
        Self {
            service: Arc::new(PointService::new(store)),
            config,
        }
    }
}

/// Open the store selected by the configuration.
///
/// # Errors
///
/// Returns an error if the backend is not compiled in or cannot be opened.
pub fn open_store(config: &ServiceConfig) -> Result<Arc<dyn LedgerStore>, ConfigError> {
    match config.storage_backend {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory store - points will not survive a restart");
            Ok(Arc::new(MemoryStore::new()))
        }
        #[cfg(feature = "rocksdb-backend")]
        StorageBackend::RocksDb => {
            tracing::info!(path = %config.data_dir, "Opening RocksDB store");
            Ok(Arc::new(point_store::RocksStore::open(&config.data_dir)?))
        }
        #[cfg(not(feature = "rocksdb-backend"))]
        StorageBackend::RocksDb => Err(ConfigError::BackendUnavailable(StorageBackend::RocksDb)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_backend_opens() {
        let store = open_store(&ServiceConfig::default()).unwrap();
        assert_eq!(store.get_user_point(1).unwrap().balance, 0);
    }

    #[cfg(not(feature = "rocksdb-backend"))]
    #[test]
    fn rocksdb_without_feature_fails() {
        let config = ServiceConfig {
            storage_backend: StorageBackend::RocksDb,
            ..ServiceConfig::default()
        };
        assert!(matches!(
            open_store(&config),
            Err(ConfigError::BackendUnavailable(StorageBackend::RocksDb))
        ));
    }

    #[cfg(feature = "rocksdb-backend")]
    #[test]
    fn rocksdb_backend_opens() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = ServiceConfig {
            storage_backend: StorageBackend::RocksDb,
            data_dir: dir.path().to_string_lossy().to_string(),
            ..ServiceConfig::default()
        };
        let store = open_store(&config).unwrap();
        store.upsert_user_point(1, 10).unwrap();
        assert_eq!(store.get_user_point(1).unwrap().balance, 10);
    }
}
