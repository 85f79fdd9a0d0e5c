//! Risk-adjusted target weights.

use opensettle_math::mul_div;
use opensettle_types::{
    PortfolioAsset, PortfolioConfig, Result, SettleError, U256,
    constants::{BPS_DENOMINATOR, WAD},
};

use crate::rebalancer::ensure_size;

/// Weights in bps proportional to `expected_return / volatility`, both
/// floored at 1. The rounding remainder goes to the first asset so the
/// weights sum to exactly 10_000.
///
/// `target_return` is recorded in the logs but does not constrain the
/// result.
pub fn calculate_optimal_weights(
    assets: &[PortfolioAsset],
    target_return: U256,
    config: &PortfolioConfig,
) -> Result<Vec<u32>> {
    ensure_size(assets, config)?;
    match assets.len() {
        0 => {
            return Err(SettleError::InvalidInput {
                reason: "no assets to weight".into(),
            });
        }
        1 => return Ok(vec![BPS_DENOMINATOR]),
        _ => {}
    }

    let one = U256::from(1);
    let ratios = assets
        .iter()
        .map(|a| mul_div(a.expected_return.max(one), WAD, a.volatility.max(one)))
        .collect::<Result<Vec<_>>>()?;
    let total = ratios
        .iter()
        .try_fold(U256::ZERO, |acc, r| acc.checked_add(*r))
        .ok_or(SettleError::Overflow {
            operation: "calculate_optimal_weights",
        })?;

    let mut weights = Vec::with_capacity(ratios.len());
    for ratio in &ratios {
        let bps = mul_div(*ratio, U256::from(BPS_DENOMINATOR), total)?;
        // ratio <= total, so bps <= 10_000
        weights.push(u32::try_from(bps).unwrap_or(BPS_DENOMINATOR));
    }
    let assigned: u32 = weights.iter().sum();
    weights[0] += BPS_DENOMINATOR - assigned;

    tracing::debug!(
        assets = assets.len(),
        target_return = %target_return,
        weights = ?weights,
        "Optimal weights computed"
    );
    Ok(weights)
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng, rngs::StdRng};

    use super::*;

    fn asset(expected_return: U256, volatility: U256) -> PortfolioAsset {
        let mut a = PortfolioAsset::dummy(0, 0, 0);
        a.expected_return = expected_return;
        a.volatility = volatility;
        a
    }

    fn cfg() -> PortfolioConfig {
        PortfolioConfig::default()
    }

    #[test]
    fn single_asset_takes_everything() {
        let weights =
            calculate_optimal_weights(&[asset(WAD, WAD)], U256::ZERO, &cfg()).unwrap();
        assert_eq!(weights, vec![10_000]);
    }

    #[test]
    fn equal_ratios_split_evenly() {
        let assets = vec![asset(WAD, WAD), asset(WAD * U256::from(2), WAD * U256::from(2))];
        let weights = calculate_optimal_weights(&assets, U256::ZERO, &cfg()).unwrap();
        assert_eq!(weights, vec![5_000, 5_000]);
    }

    #[test]
    fn remainder_goes_to_first_asset() {
        let assets = vec![asset(WAD * U256::from(2), WAD), asset(WAD, WAD)];
        let weights = calculate_optimal_weights(&assets, U256::ZERO, &cfg()).unwrap();
        // 6666 + 3333 = 9999
        assert_eq!(weights, vec![6_667, 3_333]);
    }

    #[test]
    fn zero_return_and_volatility_are_floored() {
        let assets = vec![asset(U256::ZERO, U256::ZERO), asset(WAD, WAD)];
        let weights = calculate_optimal_weights(&assets, U256::ZERO, &cfg()).unwrap();
        assert_eq!(weights, vec![5_000, 5_000]);
    }

    #[test]
    fn empty_portfolio_rejected() {
        assert!(matches!(
            calculate_optimal_weights(&[], U256::ZERO, &cfg()),
            Err(SettleError::InvalidInput { .. })
        ));
    }

    #[test]
    fn size_limit_applies() {
        let config = PortfolioConfig {
            max_assets: 1,
            ..PortfolioConfig::default()
        };
        let assets = vec![asset(WAD, WAD); 2];
        assert!(matches!(
            calculate_optimal_weights(&assets, U256::ZERO, &config),
            Err(SettleError::PortfolioSizeExceeded { .. })
        ));
    }

    #[test]
    fn target_return_does_not_change_weights() {
        // Unresolved: target_return is accepted but not yet used as a constraint.
        let assets = vec![asset(WAD * U256::from(3), WAD), asset(WAD, WAD)];
        let low = calculate_optimal_weights(&assets, U256::ZERO, &cfg()).unwrap();
        let high = calculate_optimal_weights(&assets, WAD * U256::from(100), &cfg()).unwrap();
        assert_eq!(low, high);
    }

    #[test]
    fn weights_always_sum_to_full() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..300 {
            let assets: Vec<PortfolioAsset> = (0..rng.gen_range(2..50))
                .map(|_| {
                    asset(
                        U256::from(rng.gen_range(0..u64::MAX)),
                        U256::from(rng.gen_range(0..u64::MAX)),
                    )
                })
                .collect();
            let weights = calculate_optimal_weights(&assets, U256::ZERO, &cfg()).unwrap();
            assert_eq!(weights.len(), assets.len());
            assert_eq!(weights.iter().sum::<u32>(), 10_000);
        }
    }
}
