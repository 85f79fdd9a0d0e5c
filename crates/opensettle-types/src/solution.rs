//! Generic optimization result and constraint shapes.
//!
//! Extension points for solvers built on top of this core. None of the
//! algorithms in this workspace produce them.

use alloy_primitives::{I256, U256};
use serde::{Deserialize, Serialize};

/// How a [`LinearConstraint`] relates its left-hand side to its bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConstraintRelation {
    LessOrEqual,
    Equal,
    GreaterOrEqual,
}

/// `Σ coefficients[i] · x[i]  (relation)  bound`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinearConstraint {
    pub coefficients: Vec<I256>,
    pub bound: I256,
    pub relation: ConstraintRelation,
}

/// An optimization result.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Solution {
    pub values: Vec<U256>,
    pub objective_value: U256,
    pub iterations: u32,
    pub feasible: bool,
}
