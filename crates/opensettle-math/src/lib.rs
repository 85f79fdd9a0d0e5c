//! # opensettle-math
//!
//! Fixed-point arithmetic and numeric solver primitives shared by every
//! OpenSettle component.
//!
//! - **WAD** (1e18) scaling for prices, ratios and multipliers
//! - **Basis points** (1/10_000) for percentages
//! - Integer `sqrt` / `cbrt` by Newton iteration, floor-rounded
//! - Single-step Newton-Raphson and bisection, plus a bounded solve driver

pub mod fixed_point;
pub mod solver;

pub use fixed_point::{
    apply_bps, cbrt, div_wad, div_wad_up, format_wad, mul_div, mul_div_up, mul_wad, mul_wad_up,
    sqrt, sqrt_wad, to_bps, to_decimal,
};
pub use solver::{
    BisectionStep, NewtonSolver, NewtonStep, binary_search_step, constant_product_amount_in,
    constant_product_invariant, newton_raphson_step, newton_raphson_step_with,
};
