//! API options for the solver and the estimators.
//!
//! Each estimator has a plain options struct whose `Default` reproduces the
//! customary settings, and a `validate` that rejects bad parameters before any
//! numeric work starts.

use crate::error::KError;
use crate::utils::sampling::ProbeDistribution;

/// Conjugate-gradient settings for the approximate inverse.
#[derive(Debug, Clone)]
pub struct CgOptions {
    /// Relative residual tolerance ‖b − Ax‖/‖b‖
    pub tol: f64,
    /// Iteration cap; exceeding it is an error
    pub max_iters: usize,
    /// Warm-start each solve from the previous solution
    pub use_prev: bool,
}

impl Default for CgOptions {
    fn default() -> Self {
        Self { tol: 1e-4, max_iters: 1000, use_prev: true }
    }
}

impl CgOptions {
    pub fn validate(&self) -> Result<(), KError> {
        if !(self.tol > 0.0) {
            return Err(KError::invalid(format!("CG tolerance must be positive, got {}", self.tol)));
        }
        if self.max_iters == 0 {
            return Err(KError::invalid("CG iteration cap must be at least 1"));
        }
        Ok(())
    }
}

/// Hutchinson estimator settings.
#[derive(Debug, Clone)]
pub struct HutchinsonOptions {
    pub sample_size: usize,
    /// Probes drawn and applied together
    pub block_size: usize,
    pub distribution: ProbeDistribution,
    /// Trim the last block so exactly `sample_size` probes are used
    pub exact_sample_size: bool,
}

impl Default for HutchinsonOptions {
    fn default() -> Self {
        Self {
            sample_size: 100,
            block_size: 20,
            distribution: ProbeDistribution::Rademacher,
            exact_sample_size: false,
        }
    }
}

impl HutchinsonOptions {
    pub fn validate(&self) -> Result<(), KError> {
        if self.sample_size == 0 {
            return Err(KError::invalid("sample_size must be at least 1"));
        }
        if self.block_size == 0 {
            return Err(KError::invalid("block_size must be at least 1"));
        }
        Ok(())
    }
}

/// Hutch++ estimator settings.
#[derive(Debug, Clone)]
pub struct HutchPlusPlusOptions {
    /// Total matrix-vector budget, a positive multiple of 3
    pub sample_size: usize,
    pub distribution: ProbeDistribution,
}

impl Default for HutchPlusPlusOptions {
    fn default() -> Self {
        Self { sample_size: 99, distribution: ProbeDistribution::Rademacher }
    }
}

impl HutchPlusPlusOptions {
    pub fn validate(&self) -> Result<(), KError> {
        if self.sample_size == 0 || self.sample_size % 3 != 0 {
            return Err(KError::invalid(format!(
                "Hutch++ sample_size must be a positive multiple of 3, got {}",
                self.sample_size
            )));
        }
        Ok(())
    }
}

/// Stochastic Chebyshev log-determinant settings.
#[derive(Debug, Clone)]
pub struct ChebyshevOptions {
    pub sample_size: usize,
    /// Degree N of the Chebyshev expansion
    pub order: usize,
}

impl Default for ChebyshevOptions {
    fn default() -> Self {
        Self { sample_size: 100, order: 14 }
    }
}

impl ChebyshevOptions {
    pub fn validate(&self) -> Result<(), KError> {
        if self.sample_size == 0 {
            return Err(KError::invalid("sample_size must be at least 1"));
        }
        Ok(())
    }
}

/// Stochastic diagonal estimator settings.
#[derive(Debug, Clone)]
pub struct DiagonalOptions {
    pub sample_size: usize,
    pub distribution: ProbeDistribution,
}

impl Default for DiagonalOptions {
    fn default() -> Self {
        Self { sample_size: 1000, distribution: ProbeDistribution::Rademacher }
    }
}

impl DiagonalOptions {
    pub fn validate(&self) -> Result<(), KError> {
        if self.sample_size == 0 {
            return Err(KError::invalid("sample_size must be at least 1"));
        }
        Ok(())
    }
}

/// Largest sample size or polynomial order an (ε,δ) formula may derive.
pub const MAX_DERIVED_SIZE: usize = u32::MAX as usize;

/// Rounds a derived size up, rejecting values that are not finite or exceed
/// [`MAX_DERIVED_SIZE`] instead of saturating.
pub(crate) fn derived_size(raw: f64, what: &str) -> Result<usize, KError> {
    if !raw.is_finite() || raw > MAX_DERIVED_SIZE as f64 {
        return Err(KError::invalid(format!(
            "derived {what} {raw:.3e} exceeds {MAX_DERIVED_SIZE}; relax epsilon or delta"
        )));
    }
    Ok(raw.ceil().max(0.0) as usize)
}

/// Target of an (ε,δ) estimator: relative error below `epsilon` with probability
/// at least `1 − delta`.
#[derive(Debug, Clone, Copy)]
pub struct EpsilonDelta {
    pub epsilon: f64,
    pub delta: f64,
}

impl EpsilonDelta {
    pub fn new(epsilon: f64, delta: f64) -> Self {
        Self { epsilon, delta }
    }

    /// Defaults for trace estimation (ε = δ = 0.05).
    pub fn trace_default() -> Self {
        Self::new(0.05, 0.05)
    }

    /// Defaults for log-determinant estimation (ε = ζ = 0.1).
    pub fn logdet_default() -> Self {
        Self::new(0.1, 0.1)
    }

    /// Require `ε > 0` and `0 < δ < 1`.
    pub fn validate(&self) -> Result<(), KError> {
        if !(self.epsilon > 0.0) || !self.epsilon.is_finite() {
            return Err(KError::invalid(format!("epsilon must be positive, got {}", self.epsilon)));
        }
        if !(self.delta > 0.0 && self.delta < 1.0) {
            return Err(KError::invalid(format!("delta must lie in (0, 1), got {}", self.delta)));
        }
        Ok(())
    }
}
