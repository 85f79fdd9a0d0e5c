//! Error types for the OpenSettle computation core.
//!
//! All errors use the `OS_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Routing / pool errors
//! - 2xx: Intent errors
//! - 3xx: Auction errors
//! - 4xx: Numeric errors
//! - 5xx: Portfolio errors
//! - 9xx: General / configuration errors

use alloy_primitives::U256;
use thiserror::Error;

use crate::IntentId;

/// Central error enum for all OpenSettle operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettleError {
    // =================================================================
    // Routing Errors (1xx)
    // =================================================================
    /// No candidate route was supplied.
    #[error("OS_ERR_100: No valid route found")]
    NoValidRouteFound,

    /// A route has more hops than the configured ceiling.
    #[error("OS_ERR_101: Route has {hops} hops, max is {max}")]
    MaxHopsExceeded { hops: usize, max: usize },

    /// More candidate routes than the configured ceiling.
    #[error("OS_ERR_102: {routes} candidate routes, max is {max}")]
    MaxRoutesExceeded { routes: usize, max: usize },

    /// A pool cannot serve the requested amount.
    #[error("OS_ERR_103: Insufficient liquidity: {reason}")]
    InsufficientLiquidity { reason: String },

    /// Executed output fell below the tolerated minimum.
    #[error("OS_ERR_104: Slippage exceeded: expected {expected}, got {actual} (max {max_slippage_bps} bps)")]
    SlippageExceeded {
        expected: U256,
        actual: U256,
        max_slippage_bps: u32,
    },

    /// The pool snapshot violates its structural invariants.
    #[error("OS_ERR_105: Invalid pool: {reason}")]
    InvalidPool { reason: String },

    // =================================================================
    // Intent Errors (2xx)
    // =================================================================
    /// The intent's deadline has passed.
    #[error("OS_ERR_200: Intent expired: {0}")]
    IntentExpired(IntentId),

    /// The intent is not in a matchable state or carries bad amounts.
    #[error("OS_ERR_201: Invalid intent: {reason}")]
    InvalidIntent { reason: String },

    // =================================================================
    // Auction Errors (3xx)
    // =================================================================
    /// The auction has no bids to clear.
    #[error("OS_ERR_300: Insufficient bids")]
    InsufficientBids,

    // =================================================================
    // Numeric Errors (4xx)
    // =================================================================
    /// Search bounds are inverted.
    #[error("OS_ERR_400: Invalid bounds: lower {lower} > upper {upper}")]
    InvalidBounds { lower: U256, upper: U256 },

    /// A denominator was zero.
    #[error("OS_ERR_401: Division by zero in {operation}")]
    DivisionByZero { operation: &'static str },

    /// A 256-bit intermediate overflowed.
    #[error("OS_ERR_402: Arithmetic overflow in {operation}")]
    Overflow { operation: &'static str },

    /// An iterative solve exhausted its iteration budget.
    #[error("OS_ERR_403: Solver did not converge after {iterations} iterations")]
    SolverConvergenceFailed { iterations: usize },

    // =================================================================
    // Portfolio Errors (5xx)
    // =================================================================
    /// The portfolio has more assets than the configured ceiling.
    #[error("OS_ERR_500: Portfolio has {count} assets, max is {max}")]
    PortfolioSizeExceeded { count: usize, max: usize },

    // =================================================================
    // General (9xx)
    // =================================================================
    /// The input is structurally unusable (e.g. empty where items are required).
    #[error("OS_ERR_900: Invalid input: {reason}")]
    InvalidInput { reason: String },

    /// Configuration error (zero limits, out-of-range thresholds, etc.).
    #[error("OS_ERR_901: Configuration error: {0}")]
    Configuration(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, SettleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_contains_prefix() {
        let err = SettleError::NoValidRouteFound;
        let msg = format!("{err}");
        assert!(msg.starts_with("OS_ERR_100"), "Got: {msg}");
    }

    #[test]
    fn slippage_display() {
        let err = SettleError::SlippageExceeded {
            expected: U256::from(1000),
            actual: U256::from(900),
            max_slippage_bps: 50,
        };
        let msg = format!("{err}");
        assert!(msg.contains("OS_ERR_104"));
        assert!(msg.contains("1000"));
        assert!(msg.contains("900"));
        assert!(msg.contains("50 bps"));
    }

    #[test]
    fn intent_expired_display_carries_id() {
        let id = IntentId::new();
        let msg = format!("{}", SettleError::IntentExpired(id));
        assert!(msg.contains("OS_ERR_200"));
        assert!(msg.contains(&id.to_string()));
    }

    #[test]
    fn all_errors_have_os_err_prefix() {
        let errors: Vec<Box<dyn std::error::Error>> = vec![
            Box::new(SettleError::InsufficientBids),
            Box::new(SettleError::DivisionByZero { operation: "mul_div" }),
            Box::new(SettleError::InvalidBounds {
                lower: U256::from(2),
                upper: U256::from(1),
            }),
            Box::new(SettleError::PortfolioSizeExceeded { count: 51, max: 50 }),
            Box::new(SettleError::Configuration("test".into())),
        ];
        for err in errors {
            let msg = format!("{err}");
            assert!(
                msg.starts_with("OS_ERR_"),
                "Error missing OS_ERR_ prefix: {msg}"
            );
        }
    }
}
