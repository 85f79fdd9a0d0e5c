//! Buy/sell actions that move a portfolio toward its target weights.

use opensettle_math::apply_bps;
use opensettle_types::{
    PortfolioAsset, PortfolioConfig, RebalanceAction, Result, SettleError, TradeSide, U256,
    constants::BPS_DENOMINATOR,
};

pub(crate) fn ensure_size(assets: &[PortfolioAsset], config: &PortfolioConfig) -> Result<()> {
    if assets.len() > config.max_assets {
        return Err(SettleError::PortfolioSizeExceeded {
            count: assets.len(),
            max: config.max_assets,
        });
    }
    Ok(())
}

/// Compare each asset's value with `total_value × target_weight_bps / 10_000`
/// and emit an action for every delta above the dust threshold.
///
/// Buys are prioritized by target weight; sells by `10_000 - target`, so the
/// smallest targets are trimmed first. Actions follow the order of `assets`.
pub fn calculate_rebalance_actions(
    assets: &[PortfolioAsset],
    total_value: U256,
    config: &PortfolioConfig,
) -> Result<Vec<RebalanceAction>> {
    ensure_size(assets, config)?;
    let dust = apply_bps(total_value, config.dust_threshold_bps)?;

    let mut actions = Vec::new();
    for asset in assets {
        let target_value = apply_bps(total_value, asset.target_weight_bps)?;
        let (side, amount) = if target_value > asset.current_value {
            (TradeSide::Buy, target_value - asset.current_value)
        } else {
            (TradeSide::Sell, asset.current_value - target_value)
        };
        if amount <= dust {
            continue;
        }
        let priority = match side {
            TradeSide::Buy => asset.target_weight_bps,
            TradeSide::Sell => BPS_DENOMINATOR.saturating_sub(asset.target_weight_bps),
        };
        tracing::debug!(
            token = %asset.token,
            side = %side,
            amount = %amount,
            priority,
            "Rebalance action"
        );
        actions.push(RebalanceAction {
            token: asset.token,
            side,
            amount,
            priority,
        });
    }

    tracing::info!(
        assets = assets.len(),
        actions = actions.len(),
        total_value = %total_value,
        dust = %dust,
        "Rebalance computed"
    );
    Ok(actions)
}
