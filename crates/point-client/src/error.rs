//! Client error types.

/// Errors that can occur when using the point client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned an error response we have no typed variant for.
    #[error("API error: {code} - {message}")]
    Api {
        /// Error code.
        code: String,
        /// Error message.
        message: String,
        /// HTTP status code.
        status: u16,
    },

    /// The user id was negative.
    #[error("invalid user id: {message}")]
    InvalidIdentity {
        /// Server message.
        message: String,
    },

    /// The amount was zero or negative.
    #[error("invalid amount: {message}")]
    InvalidAmount {
        /// Server message.
        message: String,
    },

    /// The charge would exceed the balance ceiling.
    #[error("balance ceiling exceeded: balance={balance}, amount={amount}, max={max}")]
    BalanceCeilingExceeded {
        /// Balance before the charge.
        balance: i64,
        /// Requested charge.
        amount: i64,
        /// The ceiling.
        max: i64,
    },

    /// The use exceeds the balance.
    #[error("insufficient balance: balance={balance}, required={required}")]
    InsufficientBalance {
        /// Current balance.
        balance: i64,
        /// Requested use.
        required: i64,
    },

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}
