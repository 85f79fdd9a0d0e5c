//! Trade intents for peer-to-peer matching.
//!
//! An [`Intent`] is a standing offer to sell `amount_in` of `token_in` for at
//! least `min_amount_out` of `token_out` before `deadline`. Time is always
//! supplied by the caller; nothing here reads a clock.

use alloy_primitives::{Address, B256, U256};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{IntentId, Result, SettleError};

/// Lifecycle status of an intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum IntentStatus {
    Pending,
    PartiallyFilled,
    Filled,
    Cancelled,
    Expired,
}

impl IntentStatus {
    /// Only pending and partially filled intents can take new fills.
    #[must_use]
    pub fn is_matchable(self) -> bool {
        matches!(self, Self::Pending | Self::PartiallyFilled)
    }
}

impl std::fmt::Display for IntentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::PartiallyFilled => write!(f, "PARTIALLY_FILLED"),
            Self::Filled => write!(f, "FILLED"),
            Self::Cancelled => write!(f, "CANCELLED"),
            Self::Expired => write!(f, "EXPIRED"),
        }
    }
}

/// A standing trade offer. Invariant: `filled_amount <= amount_in`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    pub id: IntentId,
    pub maker: Address,
    pub token_in: Address,
    pub token_out: Address,
    pub amount_in: U256,
    pub min_amount_out: U256,
    pub deadline: DateTime<Utc>,
    pub status: IntentStatus,
    pub filled_amount: U256,
    /// Hash of maker-side constraints, checked by the settlement layer.
    pub constraint_hash: B256,
}

impl Intent {
    /// Unfilled part of `amount_in`.
    #[must_use]
    pub fn remaining(&self) -> U256 {
        self.amount_in.saturating_sub(self.filled_amount)
    }

    /// An intent is expired once `now` is strictly past its deadline.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.deadline
    }

    #[must_use]
    pub fn is_matchable(&self, now: DateTime<Utc>) -> bool {
        self.status.is_matchable() && !self.is_expired(now)
    }

    /// Record a fill of `amount` (in `token_in` units) and advance the status.
    pub fn apply_fill(&mut self, amount: U256) -> Result<()> {
        if !self.status.is_matchable() {
            return Err(SettleError::InvalidIntent {
                reason: format!("{} is {}", self.id, self.status),
            });
        }
        if amount > self.remaining() {
            return Err(SettleError::InvalidIntent {
                reason: format!(
                    "fill {amount} exceeds remaining {} of {}",
                    self.remaining(),
                    self.id
                ),
            });
        }
        self.filled_amount += amount;
        self.status = if self.remaining().is_zero() {
            IntentStatus::Filled
        } else if self.filled_amount.is_zero() {
            IntentStatus::Pending
        } else {
            IntentStatus::PartiallyFilled
        };
        Ok(())
    }
}

/// Result of matching one intent against another. Transient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentMatch {
    pub intent_a: IntentId,
    pub intent_b: IntentId,
    /// Amount of `intent_a.token_in` exchanged.
    pub matched_amount: U256,
    /// WAD-scaled price in `intent_a.token_out` per `intent_a.token_in`.
    pub clearing_price: U256,
    /// Opaque settlement-route reference.
    pub settlement_route: B256,
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Intent {
    /// Pending intent selling `amount_in` of `token_in` for at least
    /// `min_amount_out` of `token_out`, valid until `deadline`.
    pub fn dummy(
        token_in: Address,
        token_out: Address,
        amount_in: u64,
        min_amount_out: u64,
        deadline: DateTime<Utc>,
    ) -> Self {
        Self {
            id: IntentId::new(),
            maker: crate::random_address(),
            token_in,
            token_out,
            amount_in: U256::from(amount_in),
            min_amount_out: U256::from(min_amount_out),
            deadline,
            status: IntentStatus::Pending,
            filled_amount: U256::ZERO,
            constraint_hash: B256::ZERO,
        }
    }
}
