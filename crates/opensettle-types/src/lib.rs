//! # opensettle-types
//!
//! Shared types, errors, and configuration for the **OpenSettle** computation core.
//!
//! This crate is the leaf dependency of the workspace; every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`IntentId`], [`settlement_reference`], plus re-exported [`Address`] / [`B256`]
//! - **Pool model**: [`PoolState`], [`SwapDirection`]
//! - **Route model**: [`Route`], [`RouteHop`], [`HopKind`]
//! - **Intent model**: [`Intent`], [`IntentStatus`], [`IntentMatch`]
//! - **Auction model**: [`AuctionBid`], [`AuctionClearing`]
//! - **Portfolio model**: [`PortfolioAsset`], [`RebalanceAction`], [`TradeSide`]
//! - **Solver shapes**: [`Solution`], [`LinearConstraint`]
//! - **Configuration**: [`EngineConfig`], [`RouterConfig`], [`SolverConfig`], [`PortfolioConfig`]
//! - **Errors**: [`SettleError`] with `OS_ERR_` prefix codes
//! - **Constants**: fixed-point scales and default limits

pub mod auction;
pub mod config;
pub mod constants;
pub mod error;
pub mod ids;
pub mod intent;
pub mod pool;
pub mod portfolio;
pub mod route;
pub mod solution;

// Re-export all primary types at crate root for ergonomic imports:
//   use opensettle_types::{Intent, Route, PoolState, U256, ...};

pub use auction::*;
pub use config::*;
pub use error::*;
pub use ids::*;
pub use intent::*;
pub use pool::*;
pub use portfolio::*;
pub use route::*;
pub use solution::*;

pub use alloy_primitives::{Address, B256, I256, U256};

// Constants are accessed via `opensettle_types::constants::FOO`
// (not re-exported to avoid name collisions).

/// Random address for test fixtures.
#[cfg(any(test, feature = "test-helpers"))]
#[must_use]
pub fn random_address() -> Address {
    Address::from(rand::random::<[u8; 20]>())
}
