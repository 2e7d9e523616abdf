//! Per-key mutual exclusion.
//!
//! Each key owns one fair async mutex, created on first use and kept for the
//! lifetime of the map. Waiters on the same key are granted the lock in the
//! order they started waiting; waiters on different keys never contend.

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Instant;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Exclusive hold on one key. Dropping it releases the key.
pub type KeyGuard = OwnedMutexGuard<()>;

/// A lazily grown map from key to a fair mutex.
pub struct KeyedLocks<K> {
    locks: DashMap<K, Arc<Mutex<()>>>,
}

impl<K> KeyedLocks<K>
where
    K: Eq + Hash + Copy + fmt::Debug,
{
    /// Create an empty lock map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            locks: DashMap::new(),
        }
    }

    /// Wait for exclusive access to `key`.
    ///
    /// Dropping the returned future before it completes abandons the wait
    /// without ever holding the key.
    pub async fn acquire(&self, key: K) -> KeyGuard {
        // Clone the handle out so no map shard stays locked across the await.
        let lock = Arc::clone(self.locks.entry(key).or_default().value());

        let started = Instant::now();
        let guard = lock.lock_owned().await;

        tracing::debug!(
            key = ?key,
            waited_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Lock acquired"
        );

        guard
    }

    /// Number of distinct keys seen so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    /// Whether no key has been acquired yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

impl<K> Default for KeyedLocks<K>
where
    K: Eq + Hash + Copy + fmt::Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash> fmt::Debug for KeyedLocks<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyedLocks")
            .field("keys", &self.locks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn entries_created_lazily_and_kept() {
        let locks = KeyedLocks::new();
        assert!(locks.is_empty());

        drop(locks.acquire(1_i64).await);
        drop(locks.acquire(2).await);
        drop(locks.acquire(1).await);

        assert_eq!(locks.len(), 2);
    }

    #[tokio::test]
    async fn different_keys_do_not_block() {
        let locks = KeyedLocks::new();
        let _held = locks.acquire(1_i64).await;

        let other = tokio::time::timeout(Duration::from_millis(100), locks.acquire(2)).await;
        assert!(other.is_ok());
    }

    #[tokio::test]
    async fn same_key_blocks_until_release() {
        let locks = KeyedLocks::new();
        let held = locks.acquire(1_i64).await;

        let blocked = tokio::time::timeout(Duration::from_millis(20), locks.acquire(1)).await;
        assert!(blocked.is_err());

        drop(held);
        let granted = tokio::time::timeout(Duration::from_millis(100), locks.acquire(1)).await;
        assert!(granted.is_ok());
    }

    #[tokio::test]
    async fn abandoned_waiter_is_never_granted() {
        let locks = Arc::new(KeyedLocks::new());
        let held = locks.acquire(7_i64).await;

        // Start waiting, then give up.
        let abandoned = tokio::time::timeout(Duration::from_millis(10), locks.acquire(7)).await;
        assert!(abandoned.is_err());

        drop(held);

        // The key is free: the abandoned wait left nothing queued.
        let next = tokio::time::timeout(Duration::from_millis(100), locks.acquire(7)).await;
        assert!(next.is_ok());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn waiters_granted_in_arrival_order() {
        let locks = Arc::new(KeyedLocks::new());
        let order = Arc::new(std::sync::Mutex::new(Vec::new()));
        let held = locks.acquire(1_i64).await;

        let mut handles = Vec::new();
        for i in 0..5 {
            let locks = Arc::clone(&locks);
            let order = Arc::clone(&order);
            handles.push(tokio::spawn(async move {
                let _guard = locks.acquire(1).await;
                order.lock().unwrap().push(i);
            }));
            // Let the spawned task run until it is queued on the mutex.
            tokio::task::yield_now().await;
        }

        drop(held);
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2, 3, 4]);
    }
}
