//! Preconditions for point operations.
//!
//! Every check here runs against a balance read inside the caller's
//! exclusive section, so the result cannot be invalidated before the write.
//! Checks run in a fixed order: identity, amount, then balance bounds.

use crate::error::{PointError, Result};
use crate::point::MAX_BALANCE;

/// Reject negative user ids.
///
/// # Errors
///
/// Returns `PointError::InvalidIdentity` if `id` is negative.
pub const fn check_id(id: i64) -> Result<()> {
    if id < 0 {
        return Err(PointError::InvalidIdentity { id });
    }
    Ok(())
}

/// Reject zero or negative amounts.
///
/// # Errors
///
/// Returns `PointError::InvalidAmount` if `amount` is not positive.
pub const fn check_amount(amount: i64) -> Result<()> {
    if amount <= 0 {
        return Err(PointError::InvalidAmount { amount });
    }
    Ok(())
}

/// Validate a charge and return the balance it produces.
///
/// # Errors
///
/// - `PointError::InvalidIdentity` if `id` is negative.
/// - `PointError::InvalidAmount` if `amount` is not positive.
/// - `PointError::BalanceCeilingExceeded` if the result would exceed `MAX_BALANCE`.
pub fn check_charge(id: i64, balance: i64, amount: i64) -> Result<i64> {
    check_id(id)?;
    check_amount(amount)?;

    match balance.checked_add(amount) {
        Some(next) if next <= MAX_BALANCE => Ok(next),
        _ => Err(PointError::BalanceCeilingExceeded {
            balance,
            amount,
            max: MAX_BALANCE,
        }),
    }
}

/// Validate a use and return the balance it produces.
///
/// # Errors
///
/// - `PointError::InvalidIdentity` if `id` is negative.
/// - `PointError::InvalidAmount` if `amount` is not positive.
/// - `PointError::InsufficientBalance` if `amount` exceeds `balance`.
pub fn check_use(id: i64, balance: i64, amount: i64) -> Result<i64> {
    check_id(id)?;
    check_amount(amount)?;

    if balance < amount {
        return Err(PointError::InsufficientBalance {
            balance,
            required: amount,
        });
    }
    Ok(balance - amount)
}
