//! Liquidity pool snapshots.
//!
//! A [`PoolState`] is a caller-assembled snapshot of a two-token
//! constant-product pool. This core never reads pool state itself.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::{Result, SettleError, constants::BPS_DENOMINATOR};

/// Which way a swap moves through a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SwapDirection {
    /// Sell `token0`, receive `token1`.
    #[default]
    ZeroForOne,
    /// Sell `token1`, receive `token0`.
    OneForZero,
}

impl std::fmt::Display for SwapDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroForOne => write!(f, "0->1"),
            Self::OneForZero => write!(f, "1->0"),
        }
    }
}

/// Snapshot of a constant-product pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolState {
    pub id: Address,
    pub token0: Address,
    pub token1: Address,
    pub reserve0: U256,
    pub reserve1: U256,
    /// Swap fee in basis points, `[0, 10_000)`.
    pub fee_bps: u32,
    /// Protocol-reported liquidity measure (informational).
    pub liquidity: U256,
}

impl PoolState {
    /// Check the snapshot is usable for swap math.
    pub fn validate(&self) -> Result<()> {
        if self.fee_bps >= BPS_DENOMINATOR {
            return Err(SettleError::InvalidPool {
                reason: format!("pool {} fee {} bps out of range", self.id, self.fee_bps),
            });
        }
        if self.reserve0.is_zero() || self.reserve1.is_zero() {
            return Err(SettleError::InsufficientLiquidity {
                reason: format!("pool {} has an empty reserve", self.id),
            });
        }
        Ok(())
    }

    /// `(reserve_in, reserve_out)` for a swap in `direction`.
    #[must_use]
    pub fn reserves(&self, direction: SwapDirection) -> (U256, U256) {
        match direction {
            SwapDirection::ZeroForOne => (self.reserve0, self.reserve1),
            SwapDirection::OneForZero => (self.reserve1, self.reserve0),
        }
    }

    /// `(token_in, token_out)` for a swap in `direction`.
    #[must_use]
    pub fn tokens(&self, direction: SwapDirection) -> (Address, Address) {
        match direction {
            SwapDirection::ZeroForOne => (self.token0, self.token1),
            SwapDirection::OneForZero => (self.token1, self.token0),
        }
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl PoolState {
    pub fn dummy(reserve0: u64, reserve1: u64, fee_bps: u32) -> Self {
        Self {
            id: crate::random_address(),
            token0: crate::random_address(),
            token1: crate::random_address(),
            reserve0: U256::from(reserve0),
            reserve1: U256::from(reserve1),
            fee_bps,
            liquidity: U256::from(reserve0) * U256::from(reserve1),
        }
    }
}
