//! Peer-to-peer intent matching.
//!
//! Two intents cross when each side's limit is satisfied at a common price.
//! Prices are WAD-scaled amounts of the primary intent's `token_out` per unit
//! of its `token_in`:
//!
//! ```text
//! price_a = a.min_amount_out / a.amount_in   (worst price A accepts)
//! price_b = b.amount_in / b.min_amount_out   (best price B offers)
//! ```
//!
//! They cross when `price_b >= price_a`; the trade clears at the midpoint.
//!
//! Nothing here reads a clock: `now` is always supplied by the caller, so the
//! same inputs produce the same matches on every node.

use chrono::{DateTime, Utc};
use opensettle_math::{format_wad, mul_div};
use opensettle_types::{
    Intent, IntentMatch, Result, SettleError, U256, constants::WAD, settlement_reference,
};
use serde::{Deserialize, Serialize};

use crate::determinism::compute_match_root;

/// Result of evaluating one pair of intents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatchQuote {
    /// `matched_amount > 0`.
    pub can_match: bool,
    /// Amount of the primary intent's `token_in` that can be exchanged.
    pub matched_amount: U256,
    /// WAD-scaled midpoint price; zero when the pair does not cross.
    pub clearing_price: U256,
}

impl MatchQuote {
    fn no_match() -> Self {
        Self::default()
    }
}

/// Output of [`find_best_matches`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatchOutcome {
    /// Matches in the order they were made.
    pub matches: Vec<IntentMatch>,
    /// Sum of `matched_amount` over `matches`.
    pub total_filled: U256,
}

fn validate_intent(intent: &Intent, now: DateTime<Utc>) -> Result<()> {
    if intent.is_expired(now) {
        return Err(SettleError::IntentExpired(intent.id));
    }
    if !intent.status.is_matchable() {
        return Err(SettleError::InvalidIntent {
            reason: format!("{} is {}", intent.id, intent.status),
        });
    }
    if intent.amount_in.is_zero() || intent.min_amount_out.is_zero() {
        return Err(SettleError::InvalidIntent {
            reason: format!("{} has a zero amount", intent.id),
        });
    }
    Ok(())
}

/// Evaluate whether `a` and `b` can trade against each other at `now`.
///
/// Expired or unmatchable intents are errors. A token pair that is not
/// exactly opposite, or prices that do not cross, yield a quote with
/// `can_match == false`.
pub fn match_intents(a: &Intent, b: &Intent, now: DateTime<Utc>) -> Result<MatchQuote> {
    validate_intent(a, now)?;
    validate_intent(b, now)?;

    if a.token_in != b.token_out || a.token_out != b.token_in {
        return Ok(MatchQuote::no_match());
    }

    let price_a = mul_div(a.min_amount_out, WAD, a.amount_in)?;
    let price_b = mul_div(b.amount_in, WAD, b.min_amount_out)?;
    if price_b < price_a {
        return Ok(MatchQuote::no_match());
    }

    let clearing_price = price_a.checked_add(price_b).ok_or(SettleError::Overflow {
        operation: "match_intents",
    })? / U256::from(2);
    if clearing_price.is_zero() {
        return Ok(MatchQuote::no_match());
    }

    let counter_capacity = mul_div(b.remaining(), WAD, clearing_price)?;
    let matched_amount = a.remaining().min(counter_capacity);

    Ok(MatchQuote {
        can_match: !matched_amount.is_zero(),
        matched_amount,
        clearing_price,
    })
}

/// Fill `intent` greedily from `counter_intents`.
///
/// Each candidate is scored by the value it can absorb
/// (`matched × price / WAD`). The highest-scoring unused candidate is taken
/// first (earliest on ties), filling `min(remaining, matched)`, until the
/// intent is filled or no crossing candidate is left. Candidates that fail
/// validation are skipped.
pub fn find_best_matches(
    intent: &Intent,
    counter_intents: &[Intent],
    now: DateTime<Utc>,
) -> Result<MatchOutcome> {
    validate_intent(intent, now)?;

    let mut quotes = Vec::with_capacity(counter_intents.len());
    let mut scores = Vec::with_capacity(counter_intents.len());
    for counter in counter_intents {
        match match_intents(intent, counter, now) {
            Ok(quote) if quote.can_match => {
                scores.push(mul_div(quote.matched_amount, quote.clearing_price, WAD)?);
                quotes.push(quote);
            }
            Ok(quote) => {
                scores.push(U256::ZERO);
                quotes.push(quote);
            }
            Err(e) => {
                tracing::warn!(
                    intent = %intent.id,
                    counter = %counter.id,
                    error = %e,
                    "Skipping invalid counter-intent"
                );
                scores.push(U256::ZERO);
                quotes.push(MatchQuote::no_match());
            }
        }
    }

    let mut used = vec![false; counter_intents.len()];
    let mut remaining = intent.remaining();
    let mut outcome = MatchOutcome::default();
    let mut fill_seq: u64 = 0;

    while !remaining.is_zero() {
        let mut best: Option<usize> = None;
        for (i, score) in scores.iter().enumerate() {
            if used[i] || score.is_zero() {
                continue;
            }
            if best.is_none_or(|b| *score > scores[b]) {
                best = Some(i);
            }
        }
        let Some(index) = best else {
            break;
        };
        used[index] = true;

        let counter = &counter_intents[index];
        let quote = quotes[index];
        let fill = remaining.min(quote.matched_amount);

        tracing::debug!(
            intent = %intent.id,
            counter = %counter.id,
            fill = %fill,
            clearing_price = %format_wad(quote.clearing_price),
            fill_seq,
            "Intent fill"
        );

        outcome.matches.push(IntentMatch {
            intent_a: intent.id,
            intent_b: counter.id,
            matched_amount: fill,
            clearing_price: quote.clearing_price,
            settlement_route: settlement_reference(intent.id, counter.id, fill_seq),
        });
        outcome.total_filled += fill;
        remaining -= fill;
        fill_seq += 1;
    }

    tracing::info!(
        intent = %intent.id,
        candidates = counter_intents.len(),
        matches = outcome.matches.len(),
        total_filled = %outcome.total_filled,
        match_root = %hex::encode(compute_match_root(&outcome.matches)),
        "Intent matching complete"
    );

    Ok(outcome)
}
