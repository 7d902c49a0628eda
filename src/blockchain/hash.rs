use serde_json::Value;
use sha2::{Digest, Sha256};

/// Length of a hex-encoded SHA-256 digest. No difficulty above this can be met.
pub const DIGEST_HEX_LEN: u32 = 64;

/// Compute the SHA-256 digest (lowercase hex) of a block's canonical fields.
///
/// Fields are joined with `|`; the payload is serialized as compact JSON.
/// `serde_json::Map` keeps keys sorted, so equal payloads always encode the same.
pub fn block_hash(
    index: u64,
    timestamp: i64,
    payload: &Value,
    prev_hash: &str,
    nonce: u64,
    difficulty: u32,
) -> String {
    let preimage = format!("{index}|{timestamp}|{payload}|{prev_hash}|{nonce}|{difficulty}");
    let mut hasher = Sha256::new();
    hasher.update(preimage.as_bytes());
    hex::encode(hasher.finalize())
}

/// Number of leading `'0'` characters in a hex digest.
pub fn leading_zeros(hash: &str) -> u32 {
    hash.chars().take_while(|c| *c == '0').count() as u32
}

/// True if `hash` starts with at least `difficulty` zero characters.
pub fn meets_difficulty(hash: &str, difficulty: u32) -> bool {
    leading_zeros(hash) >= difficulty
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn hash_is_deterministic() {
        let payload = json!({ "from": "Alice", "to": "Bob", "amount": 1 });
        let a = block_hash(1, 1_700_000_000_000, &payload, "abc", 42, 2);
        let b = block_hash(1, 1_700_000_000_000, &payload, "abc", 42, 2);
        assert_eq!(a, b);
        assert_eq!(a.len(), DIGEST_HEX_LEN as usize);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn every_field_changes_the_digest() {
        let payload = json!({ "n": 1 });
        let base = block_hash(1, 10, &payload, "prev", 0, 1);
        assert_ne!(base, block_hash(2, 10, &payload, "prev", 0, 1));
        assert_ne!(base, block_hash(1, 11, &payload, "prev", 0, 1));
        assert_ne!(base, block_hash(1, 10, &json!({ "n": 2 }), "prev", 0, 1));
        assert_ne!(base, block_hash(1, 10, &payload, "prev2", 0, 1));
        assert_ne!(base, block_hash(1, 10, &payload, "prev", 1, 1));
        assert_ne!(base, block_hash(1, 10, &payload, "prev", 0, 2));
    }

    #[test]
    fn key_order_does_not_matter() {
        let a: Value = serde_json::from_str(r#"{"a":1,"b":2}"#).unwrap();
        let b: Value = serde_json::from_str(r#"{"b":2,"a":1}"#).unwrap();
        assert_eq!(block_hash(0, 0, &a, "0", 0, 0), block_hash(0, 0, &b, "0", 0, 0));
    }

    #[test]
    fn difficulty_prefix() {
        assert_eq!(leading_zeros("000abc"), 3);
        assert_eq!(leading_zeros("abc000"), 0);
        assert!(meets_difficulty("00ff", 2));
        assert!(meets_difficulty("00ff", 1));
        assert!(!meets_difficulty("0fff", 2));
        // Difficulty 0 is the empty prefix.
        assert!(meets_difficulty("ffff", 0));
    }
}
