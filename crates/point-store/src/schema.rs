//! Database schema definitions and column families.
//!
//! This module defines the column families used in `RocksDB` storage.

/// Column family names for the `RocksDB` database.
pub mod cf {
    /// Current balances, keyed by user id.
    pub const USER_POINTS: &str = "user_points";

    /// History records, keyed by history id.
    pub const HISTORY: &str = "history";

    /// Index: history by user, keyed by `user_id || history_id`.
    /// Value is empty (index only).
    pub const HISTORY_BY_USER: &str = "history_by_user";
}

/// Returns all column family names for database initialization.
#[must_use]
pub fn all_column_families() -> Vec<&'static str> {
    vec![cf::USER_POINTS, cf::HISTORY, cf::HISTORY_BY_USER]
}
