//! Route scoring and selection.
//!
//! Every candidate is scored under one [`Objective`]; the highest score wins
//! and ties go to the earliest candidate, so the same input order always
//! yields the same choice.

use opensettle_math::mul_div;
use opensettle_types::{
    Result, Route, RouterConfig, SettleError, U256,
    constants::{BPS_DENOMINATOR, WAD},
};
use serde::{Deserialize, Serialize};

/// What "best" means when comparing routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Objective {
    /// Highest expected output.
    MaximizeReturn,
    /// Lowest cost plus weighted price impact.
    MinimizeCost,
    /// Lowest price impact.
    MinimizeRisk,
    /// Output discounted by cost and weighted impact.
    #[default]
    Balanced,
}

impl std::fmt::Display for Objective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MaximizeReturn => write!(f, "MAXIMIZE_RETURN"),
            Self::MinimizeCost => write!(f, "MINIMIZE_COST"),
            Self::MinimizeRisk => write!(f, "MINIMIZE_RISK"),
            Self::Balanced => write!(f, "BALANCED"),
        }
    }
}

fn overflow() -> SettleError {
    SettleError::Overflow {
        operation: "score_route",
    }
}

/// Score a single route under `objective`. Higher is better.
///
/// - `MaximizeReturn`: `output`
/// - `MinimizeCost`: `WAD / (cost + impact * w)`, or 0 when `cost` is 0
/// - `MinimizeRisk`: `WAD / impact`, or `WAD` when impact is 0
/// - `Balanced`: `output * WAD / (WAD + cost + impact * w)`
///
/// where `cost` is [`Route::estimated_cost`] and `w` is
/// [`RouterConfig::impact_cost_weight`].
pub fn score_route(route: &Route, objective: Objective, config: &RouterConfig) -> Result<U256> {
    let impact = U256::from(route.price_impact_bps);
    let weighted_impact = || impact.checked_mul(config.impact_cost_weight).ok_or_else(overflow);

    match objective {
        Objective::MaximizeReturn => Ok(route.total_expected_output),
        Objective::MinimizeCost => {
            // No cost data.
            if route.estimated_cost.is_zero() {
                return Ok(U256::ZERO);
            }
            let total_cost = route
                .estimated_cost
                .checked_add(weighted_impact()?)
                .ok_or_else(overflow)?;
            Ok(WAD / total_cost)
        }
        Objective::MinimizeRisk => {
            if impact.is_zero() {
                Ok(WAD)
            } else {
                Ok(WAD / impact)
            }
        }
        Objective::Balanced => {
            let weighted = weighted_impact()?;
            let denominator = WAD
                .checked_add(route.estimated_cost)
                .and_then(|d| d.checked_add(weighted))
                .ok_or_else(overflow)?;
            mul_div(route.total_expected_output, WAD, denominator)
        }
    }
}

/// Pick the best route for `objective`.
///
/// Returns a copy of the winner and its index. The winner's `score` is
/// overwritten in `routes`; the other candidates are left untouched.
pub fn find_optimal_route(
    routes: &mut [Route],
    objective: Objective,
    config: &RouterConfig,
) -> Result<(Route, usize)> {
    if routes.is_empty() {
        return Err(SettleError::NoValidRouteFound);
    }

    let mut best_index = 0;
    let mut best_score = score_route(&routes[0], objective, config)?;
    for (index, route) in routes.iter().enumerate().skip(1) {
        let score = score_route(route, objective, config)?;
        // Strict comparison: the first route reaching the maximum keeps it.
        if score > best_score {
            best_score = score;
            best_index = index;
        }
    }

    routes[best_index].score = best_score;
    let best = routes[best_index].clone();

    tracing::info!(
        objective = %objective,
        candidates = routes.len(),
        best_index,
        score = %best_score,
        hops = best.hop_count(),
        "Optimal route selected"
    );

    Ok((best, best_index))
}

/// Enforce the structural limits in `config`.
pub fn validate_routes(routes: &[Route], config: &RouterConfig) -> Result<()> {
    if routes.len() > config.max_routes {
        return Err(SettleError::MaxRoutesExceeded {
            routes: routes.len(),
            max: config.max_routes,
        });
    }
    if let Some(route) = routes.iter().find(|r| r.hop_count() > config.max_hops) {
        return Err(SettleError::MaxHopsExceeded {
            hops: route.hop_count(),
            max: config.max_hops,
        });
    }
    Ok(())
}

/// Post-execution check: `actual` must be at least `expected` less
/// `max_slippage_bps`.
pub fn check_slippage(expected: U256, actual: U256, max_slippage_bps: u32) -> Result<()> {
    let tolerated = BPS_DENOMINATOR.saturating_sub(max_slippage_bps);
    let minimum = mul_div(expected, U256::from(tolerated), U256::from(BPS_DENOMINATOR))?;
    if actual < minimum {
        tracing::warn!(
            expected = %expected,
            actual = %actual,
            minimum = %minimum,
            max_slippage_bps,
            "Slippage tolerance breached"
        );
        return Err(SettleError::SlippageExceeded {
            expected,
            actual,
            max_slippage_bps,
        });
    }
    Ok(())
}
