//! # opensettle-portfolio
//!
//! Portfolio rebalancing for the OpenSettle computation core.
//!
//! - [`calculate_rebalance_actions`]: buy/sell deltas toward target weights,
//!   with a dust filter
//! - [`calculate_optimal_weights`]: return-over-volatility target weights
//!   summing to exactly 10_000 bps

pub mod rebalancer;
pub mod weights;

pub use rebalancer::calculate_rebalance_actions;
pub use weights::calculate_optimal_weights;
