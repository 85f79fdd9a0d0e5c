//! Auction bids and clearing results.

use alloy_primitives::{Address, U256};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single bid. Callers supply bids sorted by descending `price`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuctionBid {
    pub bidder: Address,
    pub price: U256,
    pub quantity: U256,
    pub timestamp: DateTime<Utc>,
}

/// Outcome of a uniform-price auction.
///
/// `winners` and `allocations` are parallel; `allocations` sums to
/// `total_quantity`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AuctionClearing {
    pub clearing_price: U256,
    pub total_quantity: U256,
    pub filled_bids: usize,
    pub winners: Vec<Address>,
    pub allocations: Vec<U256>,
}

impl AuctionClearing {
    /// Sum of all allocations.
    #[must_use]
    pub fn allocated(&self) -> U256 {
        self.allocations
            .iter()
            .fold(U256::ZERO, |acc, a| acc.saturating_add(*a))
    }

    /// Allocation for `bidder`, summed over all of its winning bids.
    #[must_use]
    pub fn allocation_of(&self, bidder: Address) -> U256 {
        self.winners
            .iter()
            .zip(&self.allocations)
            .filter(|(w, _)| **w == bidder)
            .fold(U256::ZERO, |acc, (_, a)| acc.saturating_add(*a))
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl AuctionBid {
    pub fn dummy(price: u64, quantity: u64) -> Self {
        Self {
            bidder: crate::random_address(),
            price: U256::from(price),
            quantity: U256::from(quantity),
            timestamp: Utc::now(),
        }
    }
}
