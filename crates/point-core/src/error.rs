//! Error types for point operations.

/// Result type for point operations.
pub type Result<T> = std::result::Result<T, PointError>;

/// Business rule violations.
///
/// These are caller input errors, never transient failures. They are detected
/// before any write and are not retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PointError {
    /// The user id is negative.
    #[error("invalid user id: {id}")]
    InvalidIdentity {
        /// The rejected id.
        id: i64,
    },

    /// The amount is zero or negative.
    #[error("amount must be positive: {amount}")]
    InvalidAmount {
        /// The rejected amount.
        amount: i64,
    },

    /// A charge would push the balance above the ceiling.
    #[error("balance ceiling exceeded: balance={balance}, amount={amount}, max={max}")]
    BalanceCeilingExceeded {
        /// Balance before the charge.
        balance: i64,
        /// Requested charge.
        amount: i64,
        /// The ceiling.
        max: i64,
    },

    /// A use exceeds the current balance.
    #[error("insufficient balance: balance={balance}, required={required}")]
    InsufficientBalance {
        /// Current balance.
        balance: i64,
        /// Requested use.
        required: i64,
    },
}
