//! # opensettle-router
//!
//! Route selection for the OpenSettle computation core.
//!
//! - [`find_optimal_route`]: score candidates under an [`Objective`] and pick
//!   the best, earliest on ties
//! - [`calculate_swap_output`]: simulate a constant-product pool chain and
//!   report price impact
//! - [`calculate_optimal_split`]: divide a trade across routes by score
//! - [`calculate_liquidity_distribution`] / [`calculate_impermanent_loss`]:
//!   liquidity provisioning helpers
//!
//! Candidates are built by the caller; nothing here discovers pools or reads
//! chain state.

pub mod liquidity;
pub mod optimizer;
pub mod split;
pub mod swap;

pub use liquidity::{calculate_impermanent_loss, calculate_liquidity_distribution};
pub use optimizer::{Objective, check_slippage, find_optimal_route, score_route, validate_routes};
pub use split::{SplitPlan, calculate_optimal_split};
pub use swap::{SwapQuote, calculate_swap_output, get_amount_out};
