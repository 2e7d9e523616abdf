//! Reconstructing balances from history.

use crate::error::Result;
use crate::point::{PointHistory, TransactionType};
use crate::rules;

/// Replay history records in commit order starting from a zero balance.
///
/// Each record is checked with the same rules the service applies, so a
/// prefix that would leave `0..=MAX_BALANCE` is reported as the error that
/// operation would have produced.
///
/// # Errors
///
/// Returns the first rule violation encountered while replaying.
pub fn replay(history: &[PointHistory]) -> Result<i64> {
    history.iter().try_fold(0, |balance, record| match record.transaction_type {
        TransactionType::Charge => rules::check_charge(record.user_id, balance, record.amount),
        TransactionType::Use => rules::check_use(record.user_id, balance, record.amount),
    })
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::error::PointError;
    use crate::point::MAX_BALANCE;

    fn record(id: u64, transaction_type: TransactionType, amount: i64) -> PointHistory {
        PointHistory {
            id,
            user_id: 1,
            amount,
            transaction_type,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn empty_history_replays_to_zero() {
        assert_eq!(replay(&[]), Ok(0));
    }

    #[test]
    fn replay_applies_charges_and_uses() {
        let history = vec![
            record(1, TransactionType::Charge, 100),
            record(2, TransactionType::Use, 30),
            record(3, TransactionType::Charge, 5),
        ];
        assert_eq!(replay(&history), Ok(75));
    }

    #[test]
    fn replay_detects_negative_prefix() {
        let history = vec![
            record(1, TransactionType::Charge, 10),
            record(2, TransactionType::Use, 20),
            record(3, TransactionType::Charge, 100),
        ];
        assert_eq!(
            replay(&history),
            Err(PointError::InsufficientBalance {
                balance: 10,
                required: 20,
            })
        );
    }

    #[test]
    fn replay_detects_ceiling_breach() {
        let history = vec![
            record(1, TransactionType::Charge, MAX_BALANCE),
            record(2, TransactionType::Charge, 1),
        ];
        assert!(matches!(
            replay(&history),
            Err(PointError::BalanceCeilingExceeded { .. })
        ));
    }
}
