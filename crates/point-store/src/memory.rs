//! In-memory storage implementation.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use dashmap::DashMap;

use point_core::{PointHistory, TransactionType, UserPoint};

use crate::error::Result;
use crate::LedgerStore;

/// Process-local storage backed by concurrent maps.
///
/// Nothing survives a restart.
#[derive(Debug)]
pub struct MemoryStore {
    points: DashMap<i64, UserPoint>,
    history: DashMap<i64, Vec<PointHistory>>,
    next_history_id: AtomicU64,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            points: DashMap::new(),
            history: DashMap::new(),
            next_history_id: AtomicU64::new(1),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerStore for MemoryStore {
    fn get_user_point(&self, id: i64) -> Result<UserPoint> {
        Ok(self
            .points
            .get(&id)
            .map_or_else(|| UserPoint::empty(id), |point| point.value().clone()))
    }

    fn upsert_user_point(&self, id: i64, balance: i64) -> Result<UserPoint> {
        let point = UserPoint {
            id,
            balance,
            updated_at: Utc::now(),
        };
        self.points.insert(id, point.clone());
        Ok(point)
    }

    fn append_history(
        &self,
        user_id: i64,
        amount: i64,
        transaction_type: TransactionType,
        timestamp: DateTime<Utc>,
    ) -> Result<PointHistory> {
        // The entry guard is held while the id is drawn so that ids within a
        // user's vector are strictly increasing.
        let mut records = self.history.entry(user_id).or_default();
        let record = PointHistory {
            id: self.next_history_id.fetch_add(1, Ordering::Relaxed),
            user_id,
            amount,
            transaction_type,
            timestamp,
        };
        records.push(record.clone());
        Ok(record)
    }

    fn list_history_by_user(&self, user_id: i64) -> Result<Vec<PointHistory>> {
        Ok(self
            .history
            .get(&user_id)
            .map(|records| records.value().clone())
            .unwrap_or_default())
    }
}
