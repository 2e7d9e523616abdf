//! Point balance and history types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Upper bound a balance may never exceed.
pub const MAX_BALANCE: i64 = 1_000_000;

/// A user's current point balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPoint {
    /// The user id. Also the exclusion key.
    pub id: i64,

    /// Current balance, within `0..=MAX_BALANCE`.
    pub balance: i64,

    /// When the balance was last written.
    pub updated_at: DateTime<Utc>,
}

impl UserPoint {
    /// The record a store reports for a user it has never seen.
    #[must_use]
    pub fn empty(id: i64) -> Self {
        Self {
            id,
            balance: 0,
            updated_at: Utc::now(),
        }
    }
}

/// An immutable audit record of one successful charge or use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointHistory {
    /// Store-assigned sequence number. Increases with commit order.
    pub id: u64,

    /// The user whose balance changed.
    pub user_id: i64,

    /// Positive magnitude of the change.
    pub amount: i64,

    /// Direction of the change.
    pub transaction_type: TransactionType,

    /// When the operation happened.
    pub timestamp: DateTime<Utc>,
}

/// Direction of a balance change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    /// Points were credited.
    Charge,

    /// Points were debited.
    Use,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_user_point_has_zero_balance() {
        let point = UserPoint::empty(7);
        assert_eq!(point.id, 7);
        assert_eq!(point.balance, 0);
    }

    #[test]
    fn transaction_type_serializes_uppercase() {
        assert_eq!(
            serde_json::to_string(&TransactionType::Charge).unwrap(),
            "\"CHARGE\""
        );
        assert_eq!(serde_json::to_string(&TransactionType::Use).unwrap(), "\"USE\"");
    }
}
