//! Point Service.
//!
//! This crate provides the point service and its HTTP API:
//!
//! - Per-user mutual exclusion (`KeyedLocks`)
//! - Balance reads, history reads, charges and uses (`PointService`)
//! - The Axum router exposing those operations
//!
//! # Ordering
//!
//! Operations on one user run one at a time, in the order they asked for the
//! user's lock. Operations on different users run in parallel.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)] // Health handler needs async for routing

pub mod config;
pub mod error;
pub mod handlers;
pub mod lock;
pub mod routes;
pub mod service;
pub mod state;

pub use config::{ConfigError, ServiceConfig, StorageBackend};
pub use error::ApiError;
pub use lock::{KeyGuard, KeyedLocks};
pub use routes::create_router;
pub use service::{PointService, ServiceError};
pub use state::{open_store, AppState};
