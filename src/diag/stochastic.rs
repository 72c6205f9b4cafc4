//! Stochastic diagonal estimator (Bekas, Kokiopoulou & Saad, 2007).
//!
//! ```text
//! diag(A) ≈ (Σₖ (A vₖ) ∘ vₖ) ⊘ (Σₖ vₖ ∘ vₖ)
//! ```
//!
//! With Rademacher probes the denominator is the probe count and the estimate is
//! exact for diagonal A. Fed an [`ApproxInverse`], the same loop estimates
//! diag(A⁻¹) without ever forming the inverse.

use crate::config::{CgOptions, DiagonalOptions};
use crate::core::traits::{Indexing, LinearOperator, MatVec};
use crate::error::KError;
use crate::operator::ApproxInverse;
use crate::utils::sampling::probe_vector;
use log::debug;
use rand::Rng;

/// Stochastic estimate of diag(A).
pub fn stochastic_diagonal<O, R>(a: &mut O, opts: &DiagonalOptions, rng: &mut R) -> Result<Vec<f64>, KError>
where
    O: LinearOperator + ?Sized,
    R: Rng + ?Sized,
{
    opts.validate()?;
    let n = a.dim();
    let mut t = vec![0.0; n];
    let mut q = vec![0.0; n];
    let mut av = vec![0.0; n];
    for _ in 0..opts.sample_size {
        let v = probe_vector(opts.distribution, n, rng);
        a.apply(&v, &mut av)?;
        for i in 0..n {
            t[i] += av[i] * v[i];
            q[i] += v[i] * v[i];
        }
    }
    debug!("stochastic diagonal: {} probes, {}", opts.sample_size, opts.distribution);
    Ok(t.iter().zip(&q).map(|(ti, qi)| ti / qi).collect())
}

/// Stochastic estimate of diag(A⁻¹) for symmetric positive definite A, applying
/// A⁻¹ through warm-started conjugate gradients.
pub fn stochastic_inverse_diagonal<M, R>(
    a: M,
    cg: &CgOptions,
    opts: &DiagonalOptions,
    rng: &mut R,
) -> Result<Vec<f64>, KError>
where
    M: MatVec<Vec<f64>> + Indexing,
    R: Rng + ?Sized,
{
    cg.validate()?;
    let mut inv = ApproxInverse::with_options(a, cg);
    let d = stochastic_diagonal(&mut inv, opts, rng)?;
    debug!("stochastic inverse diagonal: {} CG iterations in total", inv.total_iterations());
    Ok(d)
}
