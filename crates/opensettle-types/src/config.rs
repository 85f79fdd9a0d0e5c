//! Configuration types for the OpenSettle computation core.
//!
//! Limits that would otherwise be compile-time constants are carried in
//! immutable structs and passed into the functions that need them.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::{Result, SettleError, constants};

/// Structural limits and scoring weights for route selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Maximum hops in a single route.
    pub max_hops: usize,
    /// Maximum candidate routes per request.
    pub max_routes: usize,
    /// Maximum routes a trade may be split across.
    pub max_splits: usize,
    /// Multiplier turning price impact (bps) into cost units.
    pub impact_cost_weight: U256,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            max_hops: constants::DEFAULT_MAX_HOPS,
            max_routes: constants::DEFAULT_MAX_ROUTES,
            max_splits: constants::DEFAULT_MAX_SPLITS,
            impact_cost_weight: U256::from(constants::DEFAULT_IMPACT_COST_WEIGHT),
        }
    }
}

/// Numeric solver settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Scale applied to `f / f'` in a Newton step.
    pub precision: U256,
    /// Iteration budget for the convenience solve driver.
    pub max_iterations: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            precision: constants::WAD,
            max_iterations: constants::DEFAULT_SOLVER_MAX_ITERATIONS,
        }
    }
}

/// Portfolio limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortfolioConfig {
    /// Maximum number of assets accepted.
    pub max_assets: usize,
    /// Deltas at or below `total_value * dust_threshold_bps / 10_000` are skipped.
    pub dust_threshold_bps: u32,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            max_assets: constants::DEFAULT_MAX_PORTFOLIO_ASSETS,
            dust_threshold_bps: constants::DEFAULT_DUST_THRESHOLD_BPS,
        }
    }
}

/// Aggregate configuration handed to the settlement layer's wiring code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub router: RouterConfig,
    pub solver: SolverConfig,
    pub portfolio: PortfolioConfig,
}

impl EngineConfig {
    /// Reject configurations that would make every call fail or divide by zero.
    pub fn validate(&self) -> Result<()> {
        if self.router.max_hops == 0 {
            return Err(SettleError::Configuration("router.max_hops must be > 0".into()));
        }
        if self.router.max_routes == 0 {
            return Err(SettleError::Configuration(
                "router.max_routes must be > 0".into(),
            ));
        }
        if self.router.max_splits == 0 {
            return Err(SettleError::Configuration(
                "router.max_splits must be > 0".into(),
            ));
        }
        if self.solver.precision.is_zero() {
            return Err(SettleError::Configuration(
                "solver.precision must be > 0".into(),
            ));
        }
        if self.solver.max_iterations == 0 {
            return Err(SettleError::Configuration(
                "solver.max_iterations must be > 0".into(),
            ));
        }
        if self.portfolio.max_assets == 0 {
            return Err(SettleError::Configuration(
                "portfolio.max_assets must be > 0".into(),
            ));
        }
        if self.portfolio.dust_threshold_bps >= constants::BPS_DENOMINATOR {
            return Err(SettleError::Configuration(format!(
                "portfolio.dust_threshold_bps must be < {}",
                constants::BPS_DENOMINATOR
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn router_config_defaults() {
        let cfg = RouterConfig::default();
        assert_eq!(cfg.max_hops, 4);
        assert_eq!(cfg.max_splits, 4);
        assert_eq!(cfg.impact_cost_weight, U256::from(1000));
    }

    #[test]
    fn default_engine_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_limits_rejected() {
        let mut cfg = EngineConfig::default();
        cfg.router.max_splits = 0;
        assert!(matches!(
            cfg.validate(),
            Err(SettleError::Configuration(_))
        ));

        let mut cfg = EngineConfig::default();
        cfg.portfolio.dust_threshold_bps = 10_000;
        assert!(matches!(
            cfg.validate(),
            Err(SettleError::Configuration(_))
        ));
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let cfg: EngineConfig =
            serde_json::from_str(r#"{"portfolio":{"max_assets":8}}"#).unwrap();
        assert_eq!(cfg.portfolio.max_assets, 8);
        assert_eq!(cfg.portfolio.dust_threshold_bps, 10);
        assert_eq!(cfg.router, RouterConfig::default());
    }

    #[test]
    fn engine_config_serde_roundtrip() {
        let cfg = EngineConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let back: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, back);
    }
}
