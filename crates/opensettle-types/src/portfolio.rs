//! Portfolio snapshots and rebalance outputs.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

/// Which way a rebalance moves a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum TradeSide {
    Buy,
    Sell,
}

impl std::fmt::Display for TradeSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

/// One asset of a weighted portfolio.
///
/// Target weights across a portfolio are expected to sum to 10_000 bps;
/// enforcing that is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioAsset {
    pub token: Address,
    pub current_weight_bps: u32,
    pub target_weight_bps: u32,
    pub current_value: U256,
    /// WAD-scaled expected return.
    pub expected_return: U256,
    /// WAD-scaled volatility.
    pub volatility: U256,
}

/// A buy or sell instruction produced by the rebalancer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebalanceAction {
    pub token: Address,
    pub side: TradeSide,
    pub amount: U256,
    /// Higher executes first.
    pub priority: u32,
}

impl RebalanceAction {
    #[must_use]
    pub fn is_buy(&self) -> bool {
        self.side == TradeSide::Buy
    }
}

impl std::fmt::Display for RebalanceAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} (priority {})",
            self.side, self.amount, self.token, self.priority
        )
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl PortfolioAsset {
    /// Asset with the given weights and value; return/volatility default to 1 WAD.
    pub fn dummy(current_weight_bps: u32, target_weight_bps: u32, current_value: u64) -> Self {
        Self {
            token: crate::random_address(),
            current_weight_bps,
            target_weight_bps,
            current_value: U256::from(current_value),
            expected_return: crate::constants::WAD,
            volatility: crate::constants::WAD,
        }
    }
}
