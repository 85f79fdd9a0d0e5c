//! Candidate execution routes.
//!
//! A [`Route`] is built by the caller from discovered hops, scored by the
//! router (which may overwrite [`Route::score`]), and discarded after one
//! settlement decision.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

/// What a single hop does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HopKind {
    #[default]
    Swap,
    Bridge,
    Wrap,
    Unwrap,
    Deposit,
    Withdraw,
}

impl std::fmt::Display for HopKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Swap => write!(f, "SWAP"),
            Self::Bridge => write!(f, "BRIDGE"),
            Self::Wrap => write!(f, "WRAP"),
            Self::Unwrap => write!(f, "UNWRAP"),
            Self::Deposit => write!(f, "DEPOSIT"),
            Self::Withdraw => write!(f, "WITHDRAW"),
        }
    }
}

/// One step of a route. Owned by the [`Route`] that contains it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteHop {
    pub kind: HopKind,
    /// Pool, bridge or wrapper contract executing the hop.
    pub protocol: Address,
    pub token_in: Address,
    pub token_out: Address,
    pub amount_in: U256,
    pub expected_out: U256,
    /// Protocol-specific calldata, opaque to this core.
    #[serde(default)]
    pub data: Vec<u8>,
}

/// An ordered chain of hops with aggregate figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub hops: Vec<RouteHop>,
    pub total_input: U256,
    pub total_expected_output: U256,
    /// Execution cost estimate (gas-denominated, caller's units).
    pub estimated_cost: U256,
    /// Price impact in basis points.
    pub price_impact_bps: u32,
    /// Assigned by the router; zero until scored.
    #[serde(default)]
    pub score: U256,
}

impl Route {
    /// Number of hops.
    #[must_use]
    pub fn hop_count(&self) -> usize {
        self.hops.len()
    }

    /// Token entering the route, if it has any hops.
    #[must_use]
    pub fn token_in(&self) -> Option<Address> {
        self.hops.first().map(|h| h.token_in)
    }

    /// Token leaving the route, if it has any hops.
    #[must_use]
    pub fn token_out(&self) -> Option<Address> {
        self.hops.last().map(|h| h.token_out)
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Route {
    /// Single-hop route with the given aggregates.
    pub fn dummy(input: u64, output: u64, cost: u64, impact_bps: u32) -> Self {
        let hop = RouteHop {
            kind: HopKind::Swap,
            protocol: crate::random_address(),
            token_in: crate::random_address(),
            token_out: crate::random_address(),
            amount_in: U256::from(input),
            expected_out: U256::from(output),
            data: Vec::new(),
        };
        Self {
            hops: vec![hop],
            total_input: U256::from(input),
            total_expected_output: U256::from(output),
            estimated_cost: U256::from(cost),
            price_impact_bps: impact_bps,
            score: U256::ZERO,
        }
    }
}
