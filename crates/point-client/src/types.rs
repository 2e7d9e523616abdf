//! Request and response types for the point client.

use chrono::{DateTime, Utc};
use point_core::TransactionType;
use serde::{Deserialize, Serialize};

/// Charge or use request body.
#[derive(Debug, Clone, Serialize)]
pub struct AmountRequest {
    /// Points to add or remove.
    pub amount: i64,
}

/// A user's balance as reported by the service.
#[derive(Debug, Clone, Deserialize)]
pub struct PointResponse {
    /// User ID.
    pub id: i64,
    /// Current balance.
    pub balance: i64,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

/// One history record as reported by the service.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryResponse {
    /// History record ID.
    pub id: u64,
    /// User ID.
    pub user_id: i64,
    /// Amount changed (always positive).
    pub amount: i64,
    /// Direction of the change.
    pub transaction_type: TransactionType,
    /// When the change happened.
    pub timestamp: DateTime<Utc>,
}

/// Error response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    /// Error details.
    pub error: ApiErrorBody,
}

/// Error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Structured details, if any.
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

impl ApiErrorBody {
    /// Read an integer field from `details`, defaulting to 0.
    #[must_use]
    pub fn detail_i64(&self, key: &str) -> i64 {
        self.details
            .as_ref()
            .and_then(|d| d.get(key))
            .and_then(serde_json::Value::as_i64)
            .unwrap_or(0)
    }
}
