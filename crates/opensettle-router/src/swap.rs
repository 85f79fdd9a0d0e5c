//! Multi-hop constant-product swap simulation.

use opensettle_math::{fixed_point::bps_denominator, mul_div};
use opensettle_types::{
    PoolState, Result, SettleError, SwapDirection, U256,
    constants::{BPS_DENOMINATOR, WAD},
};
use serde::{Deserialize, Serialize};

/// Simulated result of pushing an amount through a pool chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapQuote {
    pub amount_out: U256,
    /// Drop from the pre-trade spot rate to the post-trade rate, in bps.
    pub price_impact_bps: u32,
}

/// Output of a single constant-product swap with `fee_bps` taken from the
/// input:
///
/// `out = in·(10000 - fee)·r_out / (r_in·10000 + in·(10000 - fee))`
pub fn get_amount_out(
    amount_in: U256,
    reserve_in: U256,
    reserve_out: U256,
    fee_bps: u32,
) -> Result<U256> {
    if fee_bps >= BPS_DENOMINATOR {
        return Err(SettleError::InvalidPool {
            reason: format!("fee {fee_bps} bps out of range"),
        });
    }
    let overflow = || SettleError::Overflow {
        operation: "get_amount_out",
    };
    let in_with_fee = amount_in
        .checked_mul(U256::from(BPS_DENOMINATOR - fee_bps))
        .ok_or_else(overflow)?;
    let denominator = reserve_in
        .checked_mul(bps_denominator())
        .and_then(|d| d.checked_add(in_with_fee))
        .ok_or_else(overflow)?;
    mul_div(in_with_fee, reserve_out, denominator)
}

/// Simulate `amount_in` through `pools` in order, every hop in `direction`.
///
/// Price impact compares the product of spot rates `r_out / r_in` before the
/// trade against the same product on the post-trade reserves. Both products
/// are WAD-scaled; a post-trade rate at or above spot reports zero impact.
pub fn calculate_swap_output(
    pools: &[PoolState],
    amount_in: U256,
    direction: SwapDirection,
) -> Result<SwapQuote> {
    if pools.is_empty() {
        return Err(SettleError::NoValidRouteFound);
    }

    let mut amount = amount_in;
    let mut spot_rate = WAD;
    let mut post_rate = WAD;

    for (hop, pool) in pools.iter().enumerate() {
        pool.validate()?;
        let (reserve_in, reserve_out) = pool.reserves(direction);
        let out = get_amount_out(amount, reserve_in, reserve_out, pool.fee_bps)?;

        spot_rate = mul_div(spot_rate, reserve_out, reserve_in)?;
        let reserve_in_after = reserve_in
            .checked_add(amount)
            .ok_or(SettleError::Overflow {
                operation: "calculate_swap_output",
            })?;
        // `out < reserve_out` always holds for the formula above.
        post_rate = mul_div(post_rate, reserve_out - out, reserve_in_after)?;

        tracing::debug!(
            hop,
            pool = %pool.id,
            direction = %direction,
            amount_in = %amount,
            amount_out = %out,
            fee_bps = pool.fee_bps,
            "Swap hop simulated"
        );
        amount = out;
    }

    let price_impact_bps = if post_rate >= spot_rate {
        0
    } else {
        let impact = mul_div(spot_rate - post_rate, bps_denominator(), spot_rate)?;
        // Bounded by 10_000 since post_rate <= spot_rate.
        u32::try_from(impact).unwrap_or(BPS_DENOMINATOR)
    };

    Ok(SwapQuote {
        amount_out: amount,
        price_impact_bps,
    })
}
