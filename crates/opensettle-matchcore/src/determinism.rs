//! Determinism digests for cross-node consistency.
//!
//! Every node evaluating the same snapshot must produce the exact same
//! matches and clearings. The roots below hash those outputs so nodes can
//! compare 32 bytes instead of full payloads.

use opensettle_types::{AuctionClearing, IntentMatch};
use sha2::{Digest, Sha256};

fn finish(hasher: Sha256) -> [u8; 32] {
    let result = hasher.finalize();
    let mut root = [0u8; 32];
    root.copy_from_slice(&result);
    root
}

/// Hash over a list of intent matches.
///
/// Depends on, in order: intent ids, matched amounts, clearing prices and
/// settlement references. Reordering the matches changes the root.
#[must_use]
pub fn compute_match_root(matches: &[IntentMatch]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(b"opensettle:match_root:v1:");
    hasher.update((matches.len() as u64).to_le_bytes());

    for m in matches {
        hasher.update(m.intent_a.0.as_bytes());
        hasher.update(m.intent_b.0.as_bytes());
        hasher.update(m.matched_amount.to_be_bytes::<32>());
        hasher.update(m.clearing_price.to_be_bytes::<32>());
        hasher.update(m.settlement_route.as_slice());
    }

    finish(hasher)
}

/// Recompute the match root and compare it with `expected_root`.
#[must_use]
pub fn verify_match_root(matches: &[IntentMatch], expected_root: &[u8; 32]) -> bool {
    compute_match_root(matches) == *expected_root
}

/// Hash over a uniform-price auction result.
#[must_use]
pub fn compute_clearing_root(clearing: &AuctionClearing) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(b"opensettle:clearing_root:v1:");
    hasher.update(clearing.clearing_price.to_be_bytes::<32>());
    hasher.update(clearing.total_quantity.to_be_bytes::<32>());
    hasher.update((clearing.winners.len() as u64).to_le_bytes());

    for (winner, allocation) in clearing.winners.iter().zip(&clearing.allocations) {
        hasher.update(winner.as_slice());
        hasher.update(allocation.to_be_bytes::<32>());
    }

    finish(hasher)
}
