//! Point Service Client SDK.
//!
//! This crate provides a client library for services to read and change user
//! point balances through the point service HTTP API.
//!
//! # Example
//!
//! ```no_run
//! use point_client::PointClient;
//!
//! # async fn example() -> Result<(), point_client::ClientError> {
//! let client = PointClient::new("http://point-service:8080")?;
//!
//! let point = client.charge(42, 1_000).await?;
//! println!("New balance: {}", point.balance);
//!
//! for record in client.get_histories(42).await? {
//!     println!("{:?} {}", record.transaction_type, record.amount);
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
mod error;
mod types;

pub use client::{ClientOptions, PointClient};
pub use error::ClientError;
pub use types::*;
