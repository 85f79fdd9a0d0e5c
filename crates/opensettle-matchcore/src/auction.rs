//! Batch auction clearing.
//!
//! Two mechanisms:
//!
//! - **Uniform price**: every winner pays the marginal bid's price, the price
//!   at which cumulative demand first covers supply.
//! - **Dutch**: the price decays linearly from `start_price` to `end_price`
//!   over `duration`; a bid at the current price takes what it asks for, up
//!   to supply.
//!
//! Bids are expected sorted by descending price; the clearer does not sort
//! them, so the caller's order is the tie-break among equal prices.

use opensettle_math::{format_wad, mul_div};
use opensettle_types::{AuctionBid, AuctionClearing, Result, SettleError, U256};
use serde::{Deserialize, Serialize};

use crate::determinism::compute_clearing_root;

/// Current price and allocation of a Dutch auction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DutchQuote {
    pub current_price: U256,
    pub allocation: U256,
}

/// Clear a uniform-price auction of `total_supply` units with reserve
/// `min_price`.
///
/// ## Algorithm
///
/// 1. Walk bids in order, stopping at the first bid below `min_price`
/// 2. Accumulate quantity; the bid at which the total reaches `total_supply`
///    is marginal and sets the clearing price
/// 3. If supply is never covered, the clearing price is `min_price` and the
///    cleared quantity is the accumulated demand
/// 4. Allocate to bids priced at or above the clearing price in order, each
///    receiving `min(quantity, remaining)`
///
/// Bids that receive nothing are not listed as winners.
pub fn clear_uniform_price_auction(
    bids: &[AuctionBid],
    total_supply: U256,
    min_price: U256,
) -> Result<AuctionClearing> {
    if bids.is_empty() {
        return Err(SettleError::InsufficientBids);
    }
    if bids.windows(2).any(|w| w[0].price < w[1].price) {
        tracing::warn!(bids = bids.len(), "Auction bids are not sorted by descending price");
    }

    let mut demand = U256::ZERO;
    let mut marginal_price = None;
    for bid in bids {
        if bid.price < min_price {
            break;
        }
        demand = demand.saturating_add(bid.quantity);
        if demand >= total_supply {
            marginal_price = Some(bid.price);
            break;
        }
    }

    let (clearing_price, cleared) = match marginal_price {
        Some(price) => (price, total_supply),
        None => (min_price, demand),
    };

    let mut clearing = AuctionClearing {
        clearing_price,
        ..AuctionClearing::default()
    };
    let mut remaining = cleared;
    for bid in bids.iter().filter(|b| b.price >= clearing_price) {
        if remaining.is_zero() {
            break;
        }
        let allocation = bid.quantity.min(remaining);
        if allocation.is_zero() {
            continue;
        }
        tracing::debug!(
            bidder = %bid.bidder,
            price = %format_wad(bid.price),
            allocation = %allocation,
            "Auction allocation"
        );
        clearing.winners.push(bid.bidder);
        clearing.allocations.push(allocation);
        remaining -= allocation;
    }
    clearing.filled_bids = clearing.winners.len();
    // Equals `cleared` for sorted bids.
    clearing.total_quantity = cleared - remaining;

    tracing::info!(
        bids = bids.len(),
        clearing_price = %format_wad(clearing.clearing_price),
        total_quantity = %clearing.total_quantity,
        winners = clearing.filled_bids,
        clearing_root = %hex::encode(compute_clearing_root(&clearing)),
        "Uniform price auction cleared"
    );

    Ok(clearing)
}

/// Price and allocation of a Dutch auction `elapsed` units into a
/// `duration`-long decay from `start_price` to `end_price`.
pub fn clear_dutch_auction(
    start_price: U256,
    end_price: U256,
    duration: u64,
    elapsed: u64,
    total_supply: U256,
    bid_quantity: U256,
) -> Result<DutchQuote> {
    if end_price > start_price {
        return Err(SettleError::InvalidBounds {
            lower: end_price,
            upper: start_price,
        });
    }

    let current_price = if elapsed >= duration {
        end_price
    } else {
        let decay = mul_div(
            start_price - end_price,
            U256::from(elapsed),
            U256::from(duration),
        )?;
        start_price - decay
    };

    let quote = DutchQuote {
        current_price,
        allocation: bid_quantity.min(total_supply),
    };
    tracing::debug!(
        elapsed,
        duration,
        current_price = %format_wad(quote.current_price),
        allocation = %quote.allocation,
        "Dutch auction priced"
    );
    Ok(quote)
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng, rngs::StdRng};

    use super::*;

    fn u(v: u64) -> U256 {
        U256::from(v)
    }

    #[test]
    fn marginal_bid_sets_price() {
        let bids = vec![
            AuctionBid::dummy(10, 5),
            AuctionBid::dummy(8, 5),
            AuctionBid::dummy(6, 5),
        ];
        let clearing = clear_uniform_price_auction(&bids, u(8), u(5)).unwrap();
        assert_eq!(clearing.clearing_price, u(8));
        assert_eq!(clearing.total_quantity, u(8));
        assert_eq!(clearing.filled_bids, 2);
        assert_eq!(clearing.winners, vec![bids[0].bidder, bids[1].bidder]);
        assert_eq!(clearing.allocations, vec![u(5), u(3)]);
    }

    #[test]
    fn undersubscribed_clears_at_reserve() {
        let bids = vec![
            AuctionBid::dummy(10, 2),
            AuctionBid::dummy(8, 2),
            AuctionBid::dummy(4, 50),
        ];
        let clearing = clear_uniform_price_auction(&bids, u(10), u(5)).unwrap();
        assert_eq!(clearing.clearing_price, u(5));
        assert_eq!(clearing.total_quantity, u(4));
        assert_eq!(clearing.allocations, vec![u(2), u(2)]);
    }

    #[test]
    fn all_bids_below_reserve() {
        let bids = vec![AuctionBid::dummy(3, 10), AuctionBid::dummy(2, 10)];
        let clearing = clear_uniform_price_auction(&bids, u(10), u(5)).unwrap();
        assert_eq!(clearing.clearing_price, u(5));
        assert_eq!(clearing.total_quantity, U256::ZERO);
        assert!(clearing.winners.is_empty());
    }

    #[test]
    fn zero_quantity_bids_are_not_winners() {
        let bids = vec![
            AuctionBid::dummy(10, 0),
            AuctionBid::dummy(9, 4),
            AuctionBid::dummy(8, 4),
        ];
        let clearing = clear_uniform_price_auction(&bids, u(6), u(1)).unwrap();
        assert_eq!(clearing.clearing_price, u(8));
        assert_eq!(clearing.winners, vec![bids[1].bidder, bids[2].bidder]);
        assert_eq!(clearing.allocations, vec![u(4), u(2)]);
    }

    #[test]
    fn equal_prices_keep_caller_order() {
        let bids = vec![
            AuctionBid::dummy(7, 3),
            AuctionBid::dummy(7, 3),
            AuctionBid::dummy(7, 3),
        ];
        let clearing = clear_uniform_price_auction(&bids, u(5), u(1)).unwrap();
        assert_eq!(clearing.allocations, vec![u(3), u(2)]);
        assert_eq!(clearing.allocation_of(bids[2].bidder), U256::ZERO);
    }

    #[test]
    fn no_bids() {
        assert_eq!(
            clear_uniform_price_auction(&[], u(1), u(1)).unwrap_err(),
            SettleError::InsufficientBids
        );
    }

    #[test]
    fn allocations_sum_to_cleared_quantity() {
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..300 {
            let mut bids: Vec<AuctionBid> = (0..rng.gen_range(1..20))
                .map(|_| AuctionBid::dummy(rng.gen_range(1..100), rng.gen_range(0..50)))
                .collect();
            bids.sort_by(|a, b| b.price.cmp(&a.price));
            let supply = u(rng.gen_range(0..300));
            let min_price = u(rng.gen_range(1..100));

            let clearing = clear_uniform_price_auction(&bids, supply, min_price).unwrap();
            assert_eq!(clearing.allocated(), clearing.total_quantity);
            assert!(clearing.total_quantity <= supply);
            assert!(clearing.clearing_price >= min_price);
            assert_eq!(clearing.winners.len(), clearing.allocations.len());
            assert!(clearing.allocations.iter().all(|a| !a.is_zero()));
        }
    }

    #[test]
    fn dutch_price_decays_linearly() {
        let quote = clear_dutch_auction(u(100), u(50), 10, 5, u(1_000), u(10)).unwrap();
        assert_eq!(quote.current_price, u(75));
        assert_eq!(quote.allocation, u(10));

        let start = clear_dutch_auction(u(100), u(50), 10, 0, u(1_000), u(10)).unwrap();
        assert_eq!(start.current_price, u(100));
    }

    #[test]
    fn dutch_price_pinned_after_duration() {
        for elapsed in [10, 11, u64::MAX] {
            let quote = clear_dutch_auction(u(100), u(50), 10, elapsed, u(5), u(10)).unwrap();
            assert_eq!(quote.current_price, u(50));
            assert_eq!(quote.allocation, u(5));
        }
        let instant = clear_dutch_auction(u(100), u(50), 0, 0, u(5), u(1)).unwrap();
        assert_eq!(instant.current_price, u(50));
    }

    #[test]
    fn dutch_rejects_ascending_curve() {
        assert_eq!(
            clear_dutch_auction(u(50), u(100), 10, 0, u(1), u(1)).unwrap_err(),
            SettleError::InvalidBounds {
                lower: u(100),
                upper: u(50)
            }
        );
    }

    #[test]
    fn dutch_price_never_increases() {
        let mut last = U256::MAX;
        for elapsed in 0..=120 {
            let quote =
                clear_dutch_auction(u(1_000_000), u(777), 100, elapsed, u(1), u(1)).unwrap();
            assert!(quote.current_price <= last);
            assert!(quote.current_price >= u(777));
            last = quote.current_price;
        }
    }
}
