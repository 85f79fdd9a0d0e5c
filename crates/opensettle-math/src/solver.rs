//! Numeric solver primitives.
//!
//! [`newton_raphson_step`] and [`binary_search_step`] are single steps: the
//! caller owns the loop and decides when to stop. Neither treats
//! non-convergence as an error. [`NewtonSolver`] is a thin driver for callers
//! that want a bounded loop with an explicit failure.

use opensettle_types::{I256, Result, SettleError, SolverConfig, U256, constants::WAD};

use crate::fixed_point::{bps_denominator, mul_div_up};

/// Outcome of one Newton-Raphson step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewtonStep {
    /// Updated guess, clamped at zero.
    pub next: U256,
    /// `|delta| < tolerance`.
    pub converged: bool,
}

/// Narrowed bisection bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BisectionStep {
    pub lower: U256,
    pub upper: U256,
    pub mid: U256,
}

impl BisectionStep {
    /// Both bounds collapsed onto the midpoint.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.lower == self.upper
    }
}

/// One Newton-Raphson step with the default WAD precision.
///
/// `delta = f * WAD / f_prime`, `next = guess - delta` (never below zero).
pub fn newton_raphson_step(
    guess: U256,
    tolerance: U256,
    f: I256,
    f_prime: I256,
) -> Result<NewtonStep> {
    newton_raphson_step_with(guess, tolerance, f, f_prime, WAD)
}

/// One Newton-Raphson step scaled by `precision`.
pub fn newton_raphson_step_with(
    guess: U256,
    tolerance: U256,
    f: I256,
    f_prime: I256,
    precision: U256,
) -> Result<NewtonStep> {
    if f_prime.is_zero() {
        return Err(SettleError::DivisionByZero {
            operation: "newton_raphson_step",
        });
    }
    let precision = I256::try_from(precision).map_err(|_| SettleError::Overflow {
        operation: "newton_raphson_step",
    })?;
    let delta = f
        .checked_mul(precision)
        .and_then(|scaled| scaled.checked_div(f_prime))
        .ok_or(SettleError::Overflow {
            operation: "newton_raphson_step",
        })?;

    let magnitude = delta.unsigned_abs();
    let next = if delta.is_negative() {
        guess.checked_add(magnitude).ok_or(SettleError::Overflow {
            operation: "newton_raphson_step",
        })?
    } else {
        guess.saturating_sub(magnitude)
    };

    Ok(NewtonStep {
        next,
        converged: magnitude < tolerance,
    })
}

/// One bisection step over `[lower, upper]`.
///
/// `current` is the objective evaluated at the midpoint of the range. If it hits
/// `target` both bounds collapse onto `mid`. Otherwise the range keeps the
/// half where `target` must lie given the monotonic direction.
pub fn binary_search_step(
    lower: U256,
    upper: U256,
    target: U256,
    current: U256,
    increasing: bool,
) -> Result<BisectionStep> {
    if lower > upper {
        return Err(SettleError::InvalidBounds { lower, upper });
    }
    let mid = lower + (upper - lower) / U256::from(2);

    if current == target {
        return Ok(BisectionStep {
            lower: mid,
            upper: mid,
            mid,
        });
    }

    let search_higher = if increasing {
        current < target
    } else {
        current > target
    };

    Ok(if search_higher {
        BisectionStep {
            lower: mid,
            upper,
            mid,
        }
    } else {
        BisectionStep {
            lower,
            upper: mid,
            mid,
        }
    })
}

/// Invariant `k = x * y` of a constant-product pool.
pub fn constant_product_invariant(reserve_x: U256, reserve_y: U256) -> Result<U256> {
    reserve_x.checked_mul(reserve_y).ok_or(SettleError::Overflow {
        operation: "constant_product_invariant",
    })
}

/// Input required to receive `amount_out` from a constant-product pool
/// charging `fee_bps`, rounded up so the pool never comes out short.
///
/// Solves `(r_in + in·(1-fee)) · (r_out - out) = r_in · r_out` for `in`.
pub fn constant_product_amount_in(
    reserve_in: U256,
    reserve_out: U256,
    amount_out: U256,
    fee_bps: u32,
) -> Result<U256> {
    if amount_out >= reserve_out {
        return Err(SettleError::InsufficientLiquidity {
            reason: format!("requested {amount_out} but reserve is {reserve_out}"),
        });
    }
    let bps = bps_denominator();
    let fee = U256::from(fee_bps);
    if fee >= bps {
        return Err(SettleError::InvalidPool {
            reason: format!("fee {fee_bps} bps out of range"),
        });
    }
    let numerator = reserve_in.checked_mul(bps).ok_or(SettleError::Overflow {
        operation: "constant_product_amount_in",
    })?;
    let denominator = (reserve_out - amount_out)
        .checked_mul(bps - fee)
        .ok_or(SettleError::Overflow {
            operation: "constant_product_amount_in",
        })?;
    mul_div_up(numerator, amount_out, denominator)
}

/// Bounded Newton iteration on top of [`newton_raphson_step_with`].
#[derive(Debug, Clone, Default)]
pub struct NewtonSolver {
    config: SolverConfig,
}

impl NewtonSolver {
    #[must_use]
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Iterate from `guess` until a step converges.
    ///
    /// `eval` returns `(f(x), f'(x))` for the current guess. Fails with
    /// [`SettleError::SolverConvergenceFailed`] once `max_iterations` steps
    /// have run without converging.
    pub fn solve<F>(&self, mut guess: U256, tolerance: U256, mut eval: F) -> Result<U256>
    where
        F: FnMut(U256) -> (I256, I256),
    {
        for iteration in 0..self.config.max_iterations {
            let (f, f_prime) = eval(guess);
            let step = newton_raphson_step_with(
                guess,
                tolerance,
                f,
                f_prime,
                self.config.precision,
            )?;
            tracing::trace!(iteration, guess = %guess, next = %step.next, "Newton step");
            guess = step.next;
            if step.converged {
                tracing::debug!(iterations = iteration + 1, root = %guess, "Newton solve converged");
                return Ok(guess);
            }
        }
        tracing::warn!(
            iterations = self.config.max_iterations,
            last_guess = %guess,
            "Newton solve did not converge"
        );
        Err(SettleError::SolverConvergenceFailed {
            iterations: self.config.max_iterations,
        })
    }
}
