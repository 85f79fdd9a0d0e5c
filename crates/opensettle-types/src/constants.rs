//! System-wide constants for the OpenSettle computation core.

use alloy_primitives::U256;

/// Fixed-point scale for prices, ratios and multipliers (1e18).
pub const WAD: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

/// Denominator for basis-point percentages (100% = 10_000).
pub const BPS_DENOMINATOR: u32 = 10_000;

/// Maximum hops allowed in a single route (default).
pub const DEFAULT_MAX_HOPS: usize = 4;

/// Maximum candidate routes considered per request (default).
pub const DEFAULT_MAX_ROUTES: usize = 16;

/// Maximum routes a trade may be split across (default).
pub const DEFAULT_MAX_SPLITS: usize = 4;

/// Weight applied to price impact (bps) when folding it into a cost figure.
pub const DEFAULT_IMPACT_COST_WEIGHT: u64 = 1_000;

/// Maximum Newton iterations for the convenience solve driver (default).
pub const DEFAULT_SOLVER_MAX_ITERATIONS: usize = 255;

/// Maximum assets in a single portfolio (default).
pub const DEFAULT_MAX_PORTFOLIO_ASSETS: usize = 50;

/// Rebalance deltas at or below this share of total value are ignored (0.1%).
pub const DEFAULT_DUST_THRESHOLD_BPS: u32 = 10;
