//! Point balance and history handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use point_core::{PointHistory, TransactionType, UserPoint};

use crate::error::ApiError;
use crate::state::AppState;

/// Balance response.
#[derive(Debug, Serialize)]
pub struct PointResponse {
    /// User ID.
    pub id: i64,
    /// Current balance.
    pub balance: i64,
    /// Last update timestamp (RFC 3339).
    pub updated_at: String,
}

impl From<&UserPoint> for PointResponse {
    fn from(point: &UserPoint) -> Self {
        Self {
            id: point.id,
            balance: point.balance,
            updated_at: point.updated_at.to_rfc3339(),
        }
    }
}

/// History record response.
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    /// History record ID.
    pub id: u64,
    /// User ID.
    pub user_id: i64,
    /// Amount changed (always positive).
    pub amount: i64,
    /// `CHARGE` or `USE`.
    pub transaction_type: TransactionType,
    /// Timestamp (RFC 3339).
    pub timestamp: String,
}

impl From<&PointHistory> for HistoryResponse {
    fn from(record: &PointHistory) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id,
            amount: record.amount,
            transaction_type: record.transaction_type,
            timestamp: record.timestamp.to_rfc3339(),
        }
    }
}

/// Charge or use request.
#[derive(Debug, Deserialize)]
pub struct AmountRequest {
    /// Points to add or remove.
    pub amount: i64,
}

/// Get a user's balance.
pub async fn get_point(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<PointResponse>, ApiError> {
    let point = state.service.get_user_point(id).await?;

    Ok(Json(PointResponse::from(&point)))
}

/// List a user's history, oldest first.
pub async fn list_histories(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<HistoryResponse>>, ApiError> {
    let history = state.service.get_point_history(id).await?;

    Ok(Json(history.iter().map(HistoryResponse::from).collect()))
}

/// Charge points to a user.
pub async fn charge(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<AmountRequest>,
) -> Result<Json<PointResponse>, ApiError> {
    let point = state.service.charge(id, body.amount).await?;

    Ok(Json(PointResponse::from(&point)))
}

/// Use points from a user.
pub async fn use_points(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<AmountRequest>,
) -> Result<Json<PointResponse>, ApiError> {
    let point = state.service.use_points(id, body.amount).await?;

    Ok(Json(PointResponse::from(&point)))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn record(transaction_type: TransactionType) -> PointHistory {
        PointHistory {
            id: 1,
            user_id: 2,
            amount: 100,
            transaction_type,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn history_response_uses_wire_names() {
        let charge =
            serde_json::to_value(HistoryResponse::from(&record(TransactionType::Charge))).unwrap();
        let usage =
            serde_json::to_value(HistoryResponse::from(&record(TransactionType::Use))).unwrap();

        assert_eq!(charge["transaction_type"], "CHARGE");
        assert_eq!(usage["transaction_type"], "USE");
    }
}
