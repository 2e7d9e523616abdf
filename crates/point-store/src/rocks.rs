//! `RocksDB` storage implementation.
//!
//! This module provides the `RocksStore` implementation of the `LedgerStore` trait.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rocksdb::{
    BoundColumnFamily, ColumnFamilyDescriptor, DBWithThreadMode, Direction, IteratorMode,
    MultiThreaded, Options, WriteBatch,
};

use point_core::{PointHistory, TransactionType, UserPoint};

use crate::error::{Result, StoreError};
use crate::keys;
use crate::schema::{all_column_families, cf};
use crate::LedgerStore;

/// RocksDB-backed storage implementation.
pub struct RocksStore {
    db: Arc<DBWithThreadMode<MultiThreaded>>,
    next_history_id: AtomicU64,
}

impl RocksStore {
    /// Open or create a `RocksDB` database at the given path.
    ///
    /// The history sequence resumes after the highest id already stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors: Vec<_> = all_column_families()
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect();

        let db = DBWithThreadMode::open_cf_descriptors(&opts, path, cf_descriptors)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let store = Self {
            db: Arc::new(db),
            next_history_id: AtomicU64::new(1),
        };

        let last = store.last_history_id()?;
        store.next_history_id.store(last + 1, Ordering::SeqCst);
        tracing::debug!(last_history_id = last, "RocksDB store opened");

        Ok(store)
    }

    /// Get a column family handle.
    fn cf(&self, name: &str) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StoreError::Database(format!("column family not found: {name}")))
    }

    /// Highest history id on disk, or 0 for an empty database.
    fn last_history_id(&self) -> Result<u64> {
        let cf = self.cf(cf::HISTORY)?;
        let mut iter = self.db.iterator_cf(&cf, IteratorMode::End);

        match iter.next() {
            Some(item) => {
                let (key, _) = item.map_err(|e| StoreError::Database(e.to_string()))?;
                keys::decode_history_id(&key)
                    .ok_or_else(|| StoreError::Database("malformed history key".into()))
            }
            None => Ok(0),
        }
    }

    fn get_history(&self, history_id: u64) -> Result<Option<PointHistory>> {
        let cf = self.cf(cf::HISTORY)?;

        self.db
            .get_cf(&cf, keys::history_key(history_id))
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    /// Serialize a value using CBOR.
    fn serialize<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(value, &mut buf)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize a value from CBOR.
    fn deserialize<T: serde::de::DeserializeOwned>(data: &[u8]) -> Result<T> {
        ciborium::from_reader(data).map_err(|e| StoreError::Serialization(e.to_string()))
    }
}

impl LedgerStore for RocksStore {
    fn get_user_point(&self, id: i64) -> Result<UserPoint> {
        let cf = self.cf(cf::USER_POINTS)?;

        let stored = self
            .db
            .get_cf(&cf, keys::user_point_key(id))
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()?;

        Ok(stored.unwrap_or_else(|| UserPoint::empty(id)))
    }

    fn upsert_user_point(&self, id: i64, balance: i64) -> Result<UserPoint> {
        let cf = self.cf(cf::USER_POINTS)?;
        let point = UserPoint {
            id,
            balance,
            updated_at: Utc::now(),
        };
        let value = Self::serialize(&point)?;

        self.db
            .put_cf(&cf, keys::user_point_key(id), value)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(point)
    }

    fn append_history(
        &self,
        user_id: i64,
        amount: i64,
        transaction_type: TransactionType,
        timestamp: DateTime<Utc>,
    ) -> Result<PointHistory> {
        let cf_history = self.cf(cf::HISTORY)?;
        let cf_by_user = self.cf(cf::HISTORY_BY_USER)?;

        let record = PointHistory {
            id: self.next_history_id.fetch_add(1, Ordering::SeqCst),
            user_id,
            amount,
            transaction_type,
            timestamp,
        };
        let value = Self::serialize(&record)?;

        let mut batch = WriteBatch::default();
        batch.put_cf(&cf_history, keys::history_key(record.id), &value);
        batch.put_cf(
            &cf_by_user,
            keys::user_history_key(user_id, record.id),
            [],
        ); // Index entry (empty value)

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(record)
    }

    fn list_history_by_user(&self, user_id: i64) -> Result<Vec<PointHistory>> {
        let cf_by_user = self.cf(cf::HISTORY_BY_USER)?;
        let prefix = keys::user_history_prefix(user_id);

        let iter = self
            .db
            .iterator_cf(&cf_by_user, IteratorMode::From(&prefix, Direction::Forward));

        let mut history = Vec::new();
        for item in iter {
            let (key, _) = item.map_err(|e| StoreError::Database(e.to_string()))?;

            if !key.starts_with(&prefix) {
                break;
            }

            let history_id = keys::decode_history_id(&key)
                .ok_or_else(|| StoreError::Database("malformed history index key".into()))?;
            match self.get_history(history_id)? {
                Some(record) => history.push(record),
                None => {
                    tracing::warn!(user_id, history_id, "History index points at missing record");
                }
            }
        }

        Ok(history)
    }
}
