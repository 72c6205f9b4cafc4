//! Convergence tracking & tolerance checks for iterative solvers.

use crate::error::KError;

/// Stopping criteria: relative tolerance and iteration cap.
#[derive(Clone, Debug)]
pub struct Convergence<T> {
    pub tol: T,
    pub max_iters: usize,
}

/// Outcome of an iterative solve. `final_residual` is relative to the reference norm.
#[derive(Clone, Debug)]
pub struct SolveStats<T> {
    pub iterations: usize,
    pub final_residual: T,
    pub converged: bool,
}

impl<T: Copy + num_traits::Float> Convergence<T> {
    /// Rejects a tolerance that is not a positive finite number, and a zero iteration cap.
    pub fn validate(&self) -> Result<(), KError> {
        if !(self.tol > T::zero() && self.tol.is_finite()) {
            return Err(KError::invalid(format!(
                "tolerance must be positive and finite, got {}",
                self.tol.to_f64().unwrap_or(f64::NAN)
            )));
        }
        if self.max_iters == 0 {
            return Err(KError::invalid("iteration cap must be at least 1"));
        }
        Ok(())
    }

    /// Returns (should_stop, stats) given current `res_norm`, the reference norm
    /// `ref_norm` (‖b‖ for a linear solve) and iteration `i`.
    ///
    /// Convergence means `res_norm / ref_norm < tol`; reaching `max_iters`
    /// without it stops the iteration with `converged == false`.
    pub fn check(&self, res_norm: T, ref_norm: T, i: usize) -> (bool, SolveStats<T>) {
        let rel = res_norm / ref_norm;
        let converged = rel < self.tol;
        (
            converged || i >= self.max_iters,
            SolveStats {
                iterations: i,
                final_residual: rel,
                converged,
            },
        )
    }
}
