//! API error types and responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use point_core::PointError;

use crate::service::ServiceError;

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Negative user id.
    #[error("invalid user id: {0}")]
    InvalidIdentity(i64),

    /// Zero or negative amount.
    #[error("amount must be positive: {0}")]
    InvalidAmount(i64),

    /// Charge would exceed the balance ceiling.
    #[error("balance ceiling exceeded: balance={balance}, amount={amount}, max={max}")]
    BalanceCeilingExceeded {
        /// Current balance.
        balance: i64,
        /// Requested charge.
        amount: i64,
        /// The ceiling.
        max: i64,
    },

    /// Use exceeds the balance.
    #[error("insufficient balance: balance={balance}, required={required}")]
    InsufficientBalance {
        /// Current balance.
        balance: i64,
        /// Requested use.
        required: i64,
    },

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            Self::InvalidIdentity(_) => (
                StatusCode::BAD_REQUEST,
                "invalid_identity",
                self.to_string(),
                None,
            ),
            Self::InvalidAmount(_) => (
                StatusCode::BAD_REQUEST,
                "invalid_amount",
                self.to_string(),
                None,
            ),
            Self::BalanceCeilingExceeded {
                balance,
                amount,
                max,
            } => (
                StatusCode::CONFLICT,
                "balance_ceiling_exceeded",
                self.to_string(),
                Some(serde_json::json!({
                    "balance": balance,
                    "amount": amount,
                    "max": max
                })),
            ),
            Self::InsufficientBalance { balance, required } => (
                StatusCode::PAYMENT_REQUIRED,
                "insufficient_balance",
                self.to_string(),
                Some(serde_json::json!({
                    "balance": balance,
                    "required": required
                })),
            ),
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Rejected(PointError::InvalidIdentity { id }) => Self::InvalidIdentity(id),
            ServiceError::Rejected(PointError::InvalidAmount { amount }) => {
                Self::InvalidAmount(amount)
            }
            ServiceError::Rejected(PointError::BalanceCeilingExceeded {
                balance,
                amount,
                max,
            }) => Self::BalanceCeilingExceeded {
                balance,
                amount,
                max,
            },
            ServiceError::Rejected(PointError::InsufficientBalance { balance, required }) => {
                Self::InsufficientBalance { balance, required }
            }
            ServiceError::Store(e) => Self::Internal(e.to_string()),
        }
    }
}
