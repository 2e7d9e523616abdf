//! Point operations.
//!
//! Every operation holds the user's key for its whole read-validate-write
//! sequence. Nothing is awaited once the key is held, so a caller that goes
//! away can only do so while still waiting for the key.

use std::sync::Arc;

use chrono::Utc;

use point_core::{rules, PointError, PointHistory, TransactionType, UserPoint};
use point_store::{LedgerStore, StoreError};

use crate::lock::KeyedLocks;

/// Result type for service operations.
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Errors returned by the point service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The request broke a business rule. Nothing was written.
    #[error(transparent)]
    Rejected(#[from] PointError),

    /// The store failed. Passed through unchanged.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Charges and uses user points, serializing all work per user id.
pub struct PointService {
    store: Arc<dyn LedgerStore>,
    locks: KeyedLocks<i64>,
}

impl PointService {
    /// Create a service over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self {
            store,
            locks: KeyedLocks::new(),
        }
    }

    /// Current balance of a user.
    ///
    /// # Errors
    ///
    /// - `PointError::InvalidIdentity` if `id` is negative.
    /// - `ServiceError::Store` if the read fails.
    pub async fn get_user_point(&self, id: i64) -> Result<UserPoint> {
        let _guard = self.locks.acquire(id).await;

        rules::check_id(id).map_err(|e| rejected(id, e))?;
        Ok(self.store.get_user_point(id)?)
    }

    /// All history records of a user, oldest first.
    ///
    /// # Errors
    ///
    /// - `PointError::InvalidIdentity` if `id` is negative.
    /// - `ServiceError::Store` if the read fails.
    pub async fn get_point_history(&self, id: i64) -> Result<Vec<PointHistory>> {
        let _guard = self.locks.acquire(id).await;

        rules::check_id(id).map_err(|e| rejected(id, e))?;
        Ok(self.store.list_history_by_user(id)?)
    }

    /// Credit `amount` points to a user.
    ///
    /// # Errors
    ///
    /// - `PointError::InvalidIdentity` if `id` is negative.
    /// - `PointError::InvalidAmount` if `amount` is not positive.
    /// - `PointError::BalanceCeilingExceeded` if the balance would pass `MAX_BALANCE`.
    /// - `ServiceError::Store` if a read or write fails.
    pub async fn charge(&self, id: i64, amount: i64) -> Result<UserPoint> {
        self.apply(id, amount, TransactionType::Charge).await
    }

    /// Debit `amount` points from a user.
    ///
    /// # Errors
    ///
    /// - `PointError::InvalidIdentity` if `id` is negative.
    /// - `PointError::InvalidAmount` if `amount` is not positive.
    /// - `PointError::InsufficientBalance` if `amount` exceeds the balance.
    /// - `ServiceError::Store` if a read or write fails.
    pub async fn use_points(&self, id: i64, amount: i64) -> Result<UserPoint> {
        self.apply(id, amount, TransactionType::Use).await
    }

    async fn apply(
        &self,
        id: i64,
        amount: i64,
        transaction_type: TransactionType,
    ) -> Result<UserPoint> {
        let _guard = self.locks.acquire(id).await;

        let current = self.store.get_user_point(id)?;
        let balance = match transaction_type {
            TransactionType::Charge => rules::check_charge(id, current.balance, amount),
            TransactionType::Use => rules::check_use(id, current.balance, amount),
        }
        .map_err(|e| rejected(id, e))?;

        // If the upsert fails after the append succeeded, the history holds a
        // record the balance does not reflect. No compensation is attempted.
        self.store
            .append_history(id, amount, transaction_type, Utc::now())?;
        let updated = self.store.upsert_user_point(id, balance)?;

        tracing::info!(
            user_id = id,
            amount,
            transaction_type = ?transaction_type,
            balance = updated.balance,
            "Points updated"
        );

        Ok(updated)
    }
}

fn rejected(id: i64, err: PointError) -> ServiceError {
    tracing::warn!(user_id = id, error = %err, "Point request rejected");
    ServiceError::Rejected(err)
}
