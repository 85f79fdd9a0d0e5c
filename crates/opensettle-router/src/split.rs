//! Splitting one trade across several routes.

use opensettle_math::mul_div;
use opensettle_types::{Result, Route, SettleError, U256};
use serde::{Deserialize, Serialize};

/// How a trade is divided across routes.
///
/// `amounts[i]` and `expected_outputs[i]` refer to `routes[i]` of the call
/// that produced the plan. `amounts` sums to the requested total.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SplitPlan {
    pub amounts: Vec<U256>,
    pub expected_outputs: Vec<U256>,
    pub total_expected_out: U256,
}

impl SplitPlan {
    /// Number of routes used.
    #[must_use]
    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }
}

/// Divide `total_amount` across the first `max_splits` routes in proportion to
/// their `score` (an unscored route weighs 1).
///
/// Integer-division dust goes to the first route, so the split amounts always
/// sum to `total_amount`. Each route's expected output is scaled linearly
/// from its quoted `total_input -> total_expected_output`.
pub fn calculate_optimal_split(
    routes: &[Route],
    total_amount: U256,
    max_splits: usize,
) -> Result<SplitPlan> {
    let used = &routes[..routes.len().min(max_splits)];
    if used.is_empty() {
        return Err(SettleError::NoValidRouteFound);
    }

    let weights: Vec<U256> = used
        .iter()
        .map(|r| if r.score.is_zero() { U256::from(1) } else { r.score })
        .collect();
    let total_weight = weights
        .iter()
        .try_fold(U256::ZERO, |acc, w| acc.checked_add(*w))
        .ok_or(SettleError::Overflow {
            operation: "calculate_optimal_split",
        })?;

    let mut amounts = weights
        .iter()
        .map(|w| mul_div(total_amount, *w, total_weight))
        .collect::<Result<Vec<_>>>()?;
    let allocated = amounts.iter().fold(U256::ZERO, |acc, a| acc + *a);
    amounts[0] += total_amount - allocated;

    let expected_outputs = used
        .iter()
        .zip(&amounts)
        .map(|(route, amount)| {
            if route.total_input.is_zero() {
                Ok(U256::ZERO)
            } else {
                mul_div(*amount, route.total_expected_output, route.total_input)
            }
        })
        .collect::<Result<Vec<_>>>()?;
    let total_expected_out = expected_outputs
        .iter()
        .try_fold(U256::ZERO, |acc, o| acc.checked_add(*o))
        .ok_or(SettleError::Overflow {
            operation: "calculate_optimal_split",
        })?;

    tracing::debug!(
        routes = used.len(),
        total_amount = %total_amount,
        total_expected_out = %total_expected_out,
        "Split computed"
    );

    Ok(SplitPlan {
        amounts,
        expected_outputs,
        total_expected_out,
    })
}
