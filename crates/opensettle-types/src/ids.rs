//! Identifiers used throughout OpenSettle.
//!
//! On-chain entities (tokens, pools, makers, bidders) are identified by their
//! 20-byte [`Address`](alloy_primitives::Address). Intents use UUIDv7 for
//! time-ordered sorting. Settlement references are derived deterministically
//! so every node evaluating the same snapshot emits the same bytes.

use std::fmt;

use alloy_primitives::B256;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// IntentId
// ---------------------------------------------------------------------------

/// Globally unique intent identifier. Uses UUIDv7 for time-ordered sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct IntentId(pub Uuid);

impl IntentId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    #[must_use]
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }
}

impl Default for IntentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for IntentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "intent:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Settlement reference
// ---------------------------------------------------------------------------

/// Deterministic settlement reference for the `fill_sequence`-th fill between
/// two intents.
///
/// Opaque to this core; the settlement layer uses it to key the route that
/// will move the matched tokens.
#[must_use]
pub fn settlement_reference(intent_a: IntentId, intent_b: IntentId, fill_sequence: u64) -> B256 {
    let mut hasher = Sha256::new();
    hasher.update(b"opensettle:settlement:v1:");
    hasher.update(intent_a.0.as_bytes());
    hasher.update(intent_b.0.as_bytes());
    hasher.update(fill_sequence.to_le_bytes());
    let result = hasher.finalize();
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);
    B256::from(hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intent_id_uniqueness() {
        let a = IntentId::new();
        let b = IntentId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn intent_id_ordering() {
        let a = IntentId::new();
        let b = IntentId::new();
        assert!(a < b);
    }

    #[test]
    fn settlement_reference_deterministic() {
        let a = IntentId::from_bytes([1; 16]);
        let b = IntentId::from_bytes([2; 16]);
        assert_eq!(settlement_reference(a, b, 0), settlement_reference(a, b, 0));
        assert_ne!(settlement_reference(a, b, 0), settlement_reference(a, b, 1));
        assert_ne!(settlement_reference(a, b, 0), settlement_reference(b, a, 0));
    }

    #[test]
    fn intent_id_serde_roundtrip() {
        let id = IntentId::new();
        let json = serde_json::to_string(&id).unwrap();
        let back: IntentId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
