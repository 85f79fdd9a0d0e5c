//! Liquidity allocation across pools and impermanent-loss estimation.

use opensettle_math::{div_wad, fixed_point::bps_denominator, mul_div, sqrt_wad};
use opensettle_types::{
    PoolState, Result, SettleError, U256,
    constants::{BPS_DENOMINATOR, WAD},
};

/// Split `total_liquidity` across `pools`, favouring cheaper pools.
///
/// Each pool weighs `WAD / (1 + fee_bps)`; the rounding remainder goes to the
/// first pool so the result sums to `total_liquidity`.
pub fn calculate_liquidity_distribution(
    pools: &[PoolState],
    total_liquidity: U256,
) -> Result<Vec<U256>> {
    if pools.is_empty() {
        return Err(SettleError::InvalidInput {
            reason: "no pools to distribute liquidity across".into(),
        });
    }

    let weights: Vec<U256> = pools
        .iter()
        .map(|p| WAD / (U256::from(p.fee_bps) + U256::from(1)))
        .collect();
    let total_weight = weights.iter().fold(U256::ZERO, |acc, w| acc + *w);

    let mut allocations = weights
        .iter()
        .map(|w| mul_div(total_liquidity, *w, total_weight))
        .collect::<Result<Vec<_>>>()?;
    let allocated = allocations.iter().fold(U256::ZERO, |acc, a| acc + *a);
    allocations[0] += total_liquidity - allocated;

    tracing::debug!(
        pools = pools.len(),
        total_liquidity = %total_liquidity,
        "Liquidity distributed"
    );
    Ok(allocations)
}

/// Impermanent loss of a 50/50 constant-product position, in bps, after the
/// price moved from `initial_price` to `current_price`.
///
/// `IL = 1 - 2·sqrt(r) / (1 + r)` with `r = current / initial`.
pub fn calculate_impermanent_loss(initial_price: U256, current_price: U256) -> Result<u32> {
    if initial_price.is_zero() {
        return Err(SettleError::DivisionByZero {
            operation: "calculate_impermanent_loss",
        });
    }
    let ratio = div_wad(current_price, initial_price)?;
    let root = sqrt_wad(ratio)?;
    let held_value = WAD.checked_add(ratio).ok_or(SettleError::Overflow {
        operation: "calculate_impermanent_loss",
    })?;
    let lp_value = mul_div(root * U256::from(2), WAD, held_value)?;

    if lp_value >= WAD {
        return Ok(0);
    }
    let loss = mul_div(WAD - lp_value, bps_denominator(), WAD)?;
    Ok(u32::try_from(loss).unwrap_or(BPS_DENOMINATOR))
}
