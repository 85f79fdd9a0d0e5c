//! Integration test: one settlement decision end to end.
//!
//! Routes are simulated and scored, a trade is split, intents are matched,
//! an auction clears and a portfolio rebalances, all from fixed snapshots.

use chrono::{DateTime, Duration, Utc};
use opensettle_matchcore::{
    clear_dutch_auction, clear_uniform_price_auction, compute_clearing_root, compute_match_root,
    find_best_matches, match_intents, verify_match_root,
};
use opensettle_portfolio::{calculate_optimal_weights, calculate_rebalance_actions};
use opensettle_router::{
    Objective, calculate_optimal_split, calculate_swap_output, check_slippage, find_optimal_route,
    validate_routes,
};
use opensettle_types::{constants::WAD, *};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn u(v: u64) -> U256 {
    U256::from(v)
}

fn now() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

fn token_x() -> Address {
    Address::repeat_byte(0x11)
}

fn token_y() -> Address {
    Address::repeat_byte(0x22)
}

/// Route whose aggregates come from simulating `pools`.
fn simulated_route(pools: &[PoolState], amount_in: u64, cost: u64) -> Route {
    let quote = calculate_swap_output(pools, u(amount_in), SwapDirection::ZeroForOne).unwrap();
    let mut route = Route::dummy(amount_in, 0, cost, quote.price_impact_bps);
    route.total_expected_output = quote.amount_out;
    route
}

#[test]
fn route_selection_and_split() {
    init_tracing();
    let config = RouterConfig::default();

    let two_hop = [
        PoolState::dummy(1_000, 1_000, 30),
        PoolState::dummy(1_000, 1_000, 30),
    ];
    let deep = [PoolState::dummy(1_000_000, 1_000_000, 30)];
    let shallow = [PoolState::dummy(500, 500, 5)];

    let mut routes = vec![
        simulated_route(&two_hop, 100, 0),
        simulated_route(&deep, 100, 0),
        simulated_route(&shallow, 100, 0),
    ];
    assert_eq!(routes[0].total_expected_output, u(82));
    validate_routes(&routes, &config).unwrap();

    let (best, index) = find_optimal_route(&mut routes, Objective::MaximizeReturn, &config).unwrap();
    assert_eq!(index, 1);
    assert_eq!(best.total_expected_output, u(99));

    // Risk-averse selection agrees: the deep pool barely moves.
    let (_, risk_index) = find_optimal_route(&mut routes, Objective::MinimizeRisk, &config).unwrap();
    assert_eq!(risk_index, 1);

    let plan = calculate_optimal_split(&routes, u(1_000), config.max_splits).unwrap();
    assert_eq!(plan.amounts.iter().fold(U256::ZERO, |a, b| a + *b), u(1_000));
    check_slippage(plan.total_expected_out, plan.total_expected_out, 50).unwrap();
}

#[test]
fn intents_match_and_root_verifies() {
    init_tracing();
    let deadline = now() + Duration::minutes(10);
    let a = Intent::dummy(token_x(), token_y(), 100, 90, deadline);
    let b = Intent::dummy(token_y(), token_x(), 95, 105, deadline);

    let quote = match_intents(&a, &b, now()).unwrap();
    assert!(quote.can_match);
    assert_eq!(quote.matched_amount, u(100));

    let outcome = find_best_matches(&a, &[b.clone()], now()).unwrap();
    assert_eq!(outcome.total_filled, u(100));
    let root = compute_match_root(&outcome.matches);
    assert!(verify_match_root(&outcome.matches, &root));

    // Applying the fill leaves nothing to match.
    let mut filled = a.clone();
    filled.apply_fill(outcome.total_filled).unwrap();
    assert_eq!(filled.status, IntentStatus::Filled);
    assert!(matches!(
        match_intents(&filled, &b, now()),
        Err(SettleError::InvalidIntent { .. })
    ));

    // After the deadline the same pair is rejected.
    assert!(matches!(
        match_intents(&a, &b, deadline + Duration::seconds(1)),
        Err(SettleError::IntentExpired(_))
    ));
}

#[test]
fn same_snapshot_same_roots() {
    init_tracing();
    let deadline = now() + Duration::minutes(10);
    let primary = Intent::dummy(token_x(), token_y(), 1_000, 900, deadline);
    let counters: Vec<Intent> = (1..=5u64)
        .map(|i| Intent::dummy(token_y(), token_x(), 100 * i, 100 * i, deadline))
        .collect();

    let first = find_best_matches(&primary, &counters, now()).unwrap();
    let second = find_best_matches(&primary, &counters, now()).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        compute_match_root(&first.matches),
        compute_match_root(&second.matches)
    );

    let bids = vec![
        AuctionBid::dummy(10, 5),
        AuctionBid::dummy(8, 5),
        AuctionBid::dummy(6, 5),
    ];
    let clearing_a = clear_uniform_price_auction(&bids, u(8), u(5)).unwrap();
    let clearing_b = clear_uniform_price_auction(&bids, u(8), u(5)).unwrap();
    assert_eq!(
        compute_clearing_root(&clearing_a),
        compute_clearing_root(&clearing_b)
    );
}

#[test]
fn auctions_clear() {
    init_tracing();
    let bids = vec![
        AuctionBid::dummy(10, 5),
        AuctionBid::dummy(8, 5),
        AuctionBid::dummy(6, 5),
    ];
    let clearing = clear_uniform_price_auction(&bids, u(8), u(5)).unwrap();
    assert_eq!(clearing.clearing_price, u(8));
    assert_eq!(clearing.allocations, vec![u(5), u(3)]);
    assert_eq!(clearing.allocated(), clearing.total_quantity);

    let serialized = serde_json::to_string(&clearing).unwrap();
    let restored: AuctionClearing = serde_json::from_str(&serialized).unwrap();
    assert_eq!(restored, clearing);

    let dutch = clear_dutch_auction(u(10) * WAD, u(5) * WAD, 3_600, 1_800, u(100), u(40)).unwrap();
    assert_eq!(dutch.current_price, u(15) * WAD / u(2));
    assert_eq!(dutch.allocation, u(40));
}

#[test]
fn portfolio_rebalances_toward_optimal_weights() {
    init_tracing();
    let config = EngineConfig::default();
    config.validate().unwrap();

    let mut assets = vec![
        PortfolioAsset::dummy(7_000, 0, 70_000),
        PortfolioAsset::dummy(3_000, 0, 30_000),
    ];
    assets[0].expected_return = WAD;
    assets[1].expected_return = WAD * u(3);

    let weights = calculate_optimal_weights(&assets, WAD, &config.portfolio).unwrap();
    assert_eq!(weights, vec![2_500, 7_500]);
    for (asset, weight) in assets.iter_mut().zip(&weights) {
        asset.target_weight_bps = *weight;
    }

    let actions = calculate_rebalance_actions(&assets, u(100_000), &config.portfolio).unwrap();
    assert_eq!(actions.len(), 2);
    assert_eq!(actions[0].side, TradeSide::Sell);
    assert_eq!(actions[0].amount, u(45_000));
    assert_eq!(actions[0].priority, 7_500);
    assert_eq!(actions[1].side, TradeSide::Buy);
    assert_eq!(actions[1].amount, u(45_000));
    assert_eq!(actions[1].priority, 7_500);
}
