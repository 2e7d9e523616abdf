//! Storage layer for the point ledger.
//!
//! This crate holds current balances and the append-only history per user.
//! Each operation is individually atomic; composing them into larger atomic
//! units is the caller's job.
//!
//! # Backends
//!
//! - `MemoryStore`: concurrent in-process maps, the default
//! - `RocksStore`: `RocksDB` with column families (feature `rocksdb-backend`)
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use point_core::TransactionType;
//! use point_store::{LedgerStore, MemoryStore};
//!
//! let store = MemoryStore::new();
//!
//! // Unknown users read as a zero balance
//! assert_eq!(store.get_user_point(1).unwrap().balance, 0);
//!
//! store.append_history(1, 100, TransactionType::Charge, Utc::now()).unwrap();
//! store.upsert_user_point(1, 100).unwrap();
//!
//! assert_eq!(store.get_user_point(1).unwrap().balance, 100);
//! assert_eq!(store.list_history_by_user(1).unwrap().len(), 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod memory;

#[cfg(feature = "rocksdb-backend")]
pub mod keys;
#[cfg(feature = "rocksdb-backend")]
pub mod rocks;
#[cfg(feature = "rocksdb-backend")]
pub mod schema;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
#[cfg(feature = "rocksdb-backend")]
pub use rocks::RocksStore;

use chrono::{DateTime, Utc};
use point_core::{PointHistory, TransactionType, UserPoint};

/// The storage trait consumed by the point service.
///
/// Implementations must make every single call atomic with respect to
/// concurrent calls; they need not provide any multi-call transactions.
pub trait LedgerStore: Send + Sync {
    /// Get a user's current balance.
    ///
    /// Returns `UserPoint::empty(id)` if the user has no stored balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_user_point(&self, id: i64) -> Result<UserPoint>;

    /// Insert or replace a user's balance, stamping the update time.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn upsert_user_point(&self, id: i64, balance: i64) -> Result<UserPoint>;

    /// Append a history record and return it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn append_history(
        &self,
        user_id: i64,
        amount: i64,
        transaction_type: TransactionType,
        timestamp: DateTime<Utc>,
    ) -> Result<PointHistory>;

    /// List a user's history in commit order (oldest first).
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_history_by_user(&self, user_id: i64) -> Result<Vec<PointHistory>>;
}
