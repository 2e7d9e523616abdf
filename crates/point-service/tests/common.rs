//! Common test utilities for point service integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;
use chrono::{DateTime, Utc};

use point_core::{PointHistory, TransactionType, UserPoint};
use point_service::{create_router, AppState, ServiceConfig};
use point_store::{LedgerStore, MemoryStore, StoreError};

/// Test harness containing everything needed for HTTP integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// The store behind the server, for seeding and inspection.
    pub store: Arc<RecordingStore>,
}

impl TestHarness {
    /// Create a new test harness with an empty in-memory store.
    pub fn new() -> Self {
        let store = Arc::new(RecordingStore::new());

        let config = ServiceConfig {
            listen_addr: "127.0.0.1:0".into(),
            ..ServiceConfig::default()
        };

        let state = AppState::new(store.clone(), config);
        let router: Router = create_router(state);

        let server = TestServer::new(router).expect("Failed to create test server");

        Self { server, store }
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// A memory store that counts writes and can be told to fail them.
#[derive(Default)]
pub struct RecordingStore {
    inner: MemoryStore,
    writes: AtomicUsize,
    fail_upserts: AtomicBool,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `upsert_user_point` and `append_history` calls.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Make every following upsert fail with a database error.
    pub fn fail_upserts(&self, fail: bool) {
        self.fail_upserts.store(fail, Ordering::SeqCst);
    }
}

impl LedgerStore for RecordingStore {
    fn get_user_point(&self, id: i64) -> point_store::Result<UserPoint> {
        self.inner.get_user_point(id)
    }

    fn upsert_user_point(&self, id: i64, balance: i64) -> point_store::Result<UserPoint> {
        if self.fail_upserts.load(Ordering::SeqCst) {
            return Err(StoreError::Database("disk unavailable".into()));
        }
        let point = self.inner.upsert_user_point(id, balance)?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(point)
    }

    fn append_history(
        &self,
        user_id: i64,
        amount: i64,
        transaction_type: TransactionType,
        timestamp: DateTime<Utc>,
    ) -> point_store::Result<PointHistory> {
        let record = self
            .inner
            .append_history(user_id, amount, transaction_type, timestamp)?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(record)
    }

    fn list_history_by_user(&self, user_id: i64) -> point_store::Result<Vec<PointHistory>> {
        self.inner.list_history_by_user(user_id)
    }
}
