//! # opensettle-matchcore
//!
//! **Intent matching and auction clearing for OpenSettle.**
//!
//! MatchCore turns caller-supplied snapshots of intents and bids into
//! matches and clearings. It has:
//!
//! - **Zero side effects**: no I/O, no clocks, no balance checks
//! - **Deterministic output**: same input -> same output on every node,
//!   verifiable through SHA-256 roots
//! - **Greedy intent filling**: best-scoring counter-intent first, earliest
//!   on ties
//! - **Uniform-price and Dutch auctions** over pre-sorted bids

pub mod auction;
pub mod determinism;
pub mod intent_matcher;

pub use auction::{DutchQuote, clear_dutch_auction, clear_uniform_price_auction};
pub use determinism::{compute_clearing_root, compute_match_root, verify_match_root};
pub use intent_matcher::{MatchOutcome, MatchQuote, find_best_matches, match_intents};
