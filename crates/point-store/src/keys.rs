//! Key encoding utilities for `RocksDB`.
//!
//! All integers are encoded big-endian so that byte order matches numeric
//! order for the non-negative ids the service stores.

/// Create a balance key from a user id.
#[must_use]
pub fn user_point_key(user_id: i64) -> [u8; 8] {
    user_id.to_be_bytes()
}

/// Create a history key from a history id.
#[must_use]
pub fn history_key(history_id: u64) -> [u8; 8] {
    history_id.to_be_bytes()
}

/// Create a user-history index key.
///
/// Format: `user_id (8 bytes) || history_id (8 bytes)`
///
/// History ids increase with commit order, so a prefix scan yields a user's
/// records oldest first.
#[must_use]
pub fn user_history_key(user_id: i64, history_id: u64) -> [u8; 16] {
    let mut key = [0u8; 16];
    key[..8].copy_from_slice(&user_id.to_be_bytes());
    key[8..].copy_from_slice(&history_id.to_be_bytes());
    key
}

/// Create a prefix for iterating all history for a user.
#[must_use]
pub fn user_history_prefix(user_id: i64) -> [u8; 8] {
    user_id.to_be_bytes()
}

/// Decode a history id from a `history` key or the tail of an index key.
///
/// Returns `None` if the key is too short.
#[must_use]
pub fn decode_history_id(key: &[u8]) -> Option<u64> {
    let tail = key.get(key.len().checked_sub(8)?..)?;
    Some(u64::from_be_bytes(tail.try_into().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_history_key_format() {
        let key = user_history_key(5, 9);
        assert_eq!(key.len(), 16);
        assert_eq!(&key[..8], &user_history_prefix(5));
        assert_eq!(&key[8..], &history_key(9));
    }

    #[test]
    fn decode_history_id_from_both_key_kinds() {
        assert_eq!(decode_history_id(&history_key(77)), Some(77));
        assert_eq!(decode_history_id(&user_history_key(3, 77)), Some(77));
        assert_eq!(decode_history_id(&[1, 2, 3]), None);
    }

    #[test]
    fn history_keys_sort_numerically() {
        assert!(history_key(255) < history_key(256));
        assert!(user_history_key(1, 255) < user_history_key(1, 256));
    }
}
