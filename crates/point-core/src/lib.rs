//! Core types and business rules for the point ledger.
//!
//! This crate provides the foundational types shared by the store, the service and the client:
//!
//! - **Points**: `UserPoint`, `PointHistory`, `TransactionType`
//! - **Rules**: the preconditions every charge/use must satisfy
//! - **Ledger**: replaying a user's history to reconstruct a balance
//!
//! # Balance Bounds
//!
//! A balance always lies in `0..=MAX_BALANCE` between operations.
//! Amounts and balances are stored as `i64` so that negative input can be
//! represented and rejected instead of being unrepresentable.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod ledger;
pub mod point;
pub mod rules;

pub use error::{PointError, Result};
pub use ledger::replay;
pub use point::{PointHistory, TransactionType, UserPoint, MAX_BALANCE};
