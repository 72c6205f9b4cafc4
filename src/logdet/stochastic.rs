//! Stochastic Chebyshev log-determinant (Han, Malioutov & Shin, 2015).
//!
//! For SPD C with spectrum in [σ_min, σ_max], let a = σ_min + σ_max and
//! δ = σ_min/a, so B = C/a has spectrum in [δ, 1 − δ]. The affine map
//! g(x) = ((1 − 2δ)/2)·x + ½ carries [-1, 1] onto that interval, and
//!
//! ```text
//! logdet(C) = tr log(B) + d·ln a = tr h(M) + d·ln a,
//! h(x) = ln(1 − g(x)),   M = (I − 2B)/(1 − 2δ).
//! ```
//!
//! h is replaced by its degree-N Chebyshev expansion, tr by Hutchinson with
//! Rademacher probes, and each T_k(M)·v is built by the three-term recurrence
//! w_k = 2M·w_{k−1} − w_{k−2}, so one probe costs N applications of C.

use crate::config::options::derived_size;
use crate::config::{ChebyshevOptions, EpsilonDelta};
use crate::core::traits::{InnerProduct, LinearOperator};
use crate::error::KError;
use crate::logdet::chebyshev::ChebyshevExpansion;
use crate::utils::sampling::{ProbeDistribution, probe_vector};
use crate::utils::spectrum::{Lanczos, SpectralBounds};
use log::{debug, info, warn};
use rand::Rng;

/// A log-determinant estimate with the parameters that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogdetEstimate {
    pub value: f64,
    pub sample_size: usize,
    /// Degree of the Chebyshev expansion
    pub order: usize,
}

/// y = M x = (x − (2/a)·C x)/(1 − 2δ)
fn apply_mapped<O>(c: &mut O, x: &[f64], y: &mut [f64], a: f64, scale: f64) -> Result<(), KError>
where
    O: LinearOperator + ?Sized,
{
    c.apply(x, y)?;
    for (yi, xi) in y.iter_mut().zip(x) {
        *yi = (xi - 2.0 * *yi / a) / scale;
    }
    Ok(())
}

/// Stochastic Chebyshev estimate of logdet(C) for symmetric positive definite C.
///
/// Without `bounds`, the spectral interval is estimated with [`Lanczos`].
pub fn logdet_stochastic_chebyshev<O, R>(
    c: &mut O,
    bounds: Option<SpectralBounds>,
    opts: &ChebyshevOptions,
    rng: &mut R,
) -> Result<f64, KError>
where
    O: LinearOperator + ?Sized,
    R: Rng + ?Sized,
{
    opts.validate()?;
    let d = c.dim();
    let bounds = match bounds {
        Some(b) => b,
        None => Lanczos::default().bounds(c, rng)?,
    };
    bounds.validate_positive()?;
    let SpectralBounds { lambda_min: sigma_min, lambda_max: sigma_max } = bounds;

    if sigma_max - sigma_min <= f64::EPSILON * sigma_max {
        // every eigenvalue equals sigma_max
        debug!("stochastic chebyshev: degenerate spectral interval at {:.6e}", sigma_max);
        return Ok(d as f64 * sigma_max.ln());
    }

    let a = sigma_min + sigma_max;
    let delta = sigma_min / a;
    let scale = 1.0 - 2.0 * delta;
    let expansion = ChebyshevExpansion::new(|x| (1.0 - (scale / 2.0 * x + 0.5)).ln(), opts.order);
    let coeffs = expansion.coefficients();

    let ip = ();
    let mut u = vec![0.0; d];
    let mut w0 = vec![0.0; d];
    let mut w1 = vec![0.0; d];
    let mut w2 = vec![0.0; d];
    let mut estimate = 0.0;
    for _ in 0..opts.sample_size {
        let v = probe_vector(ProbeDistribution::Rademacher, d, rng);
        for (ui, vi) in u.iter_mut().zip(&v) {
            *ui = coeffs[0] * vi;
        }
        if opts.order >= 1 {
            w0.copy_from_slice(&v);
            apply_mapped(c, &v, &mut w1, a, scale)?;
            for (ui, wi) in u.iter_mut().zip(&w1) {
                *ui += coeffs[1] * wi;
            }
            for &ck in &coeffs[2..] {
                apply_mapped(c, &w1, &mut w2, a, scale)?;
                for ((ui, w2i), w0i) in u.iter_mut().zip(w2.iter_mut()).zip(&w0) {
                    *w2i = 2.0 * *w2i - w0i;
                    *ui += ck * *w2i;
                }
                std::mem::swap(&mut w0, &mut w1);
                std::mem::swap(&mut w1, &mut w2);
            }
        }
        estimate += ip.dot(&v, &u) / opts.sample_size as f64;
    }

    debug!(
        "stochastic chebyshev: {} probes, order {}, interval [{:.4e}, {:.4e}]",
        opts.sample_size, opts.order, sigma_min, sigma_max
    );
    Ok(estimate + d as f64 * a.ln())
}

/// Sample size M and order N for relative error ε with probability ≥ 1 − ζ,
/// given the condition number κ:
///
/// ```text
/// M = ⌈14/ε² · ln(1 + κ²)² · ln(2/ζ)⌉
/// N = ⌈ln((20/ε)(√(2κ²+1) − 1) · ln(2 + 2κ²)/ln(1 + 1/κ²)) / ln((√(2κ²+1) + 1)/(√(2κ²+1) − 1))⌉
/// ```
///
/// Here `target.delta` plays the role of ζ.
pub fn chebyshev_parameters(target: EpsilonDelta, kappa: f64) -> Result<(usize, usize), KError> {
    target.validate()?;
    if !(kappa >= 1.0) || !kappa.is_finite() {
        return Err(KError::invalid(format!("condition number must be finite and >= 1, got {kappa}")));
    }
    let eps = target.epsilon;
    let zeta = target.delta;
    let k2 = kappa * kappa;

    let m = 14.0 / (eps * eps) * (1.0 + k2).ln().powi(2) * (2.0 / zeta).ln();

    let s = (2.0 * k2 + 1.0).sqrt();
    let n_num = ((20.0 / eps) * (s - 1.0) * ((2.0 + 2.0 * k2).ln() / (1.0 + 1.0 / k2).ln())).ln();
    let n_denom = ((s + 1.0) / (s - 1.0)).ln();
    let n = n_num / n_denom;

    Ok((derived_size(m, "sample size")?, derived_size(n, "order")?.max(1)))
}

/// (ε,ζ) stochastic Chebyshev estimate of logdet(C) for symmetric positive definite C.
///
/// The guarantee |estimate − logdet(C)| < ε·|logdet(C)| with probability ≥ 1 − ζ
/// holds only with the derived sample size; the bound is loose, so an override is
/// accepted but logged as forfeiting it.
pub fn logdet_stochastic_chebyshev_epsilon_delta<O, R>(
    c: &mut O,
    target: EpsilonDelta,
    bounds: Option<SpectralBounds>,
    sample_size_override: Option<usize>,
    rng: &mut R,
) -> Result<LogdetEstimate, KError>
where
    O: LinearOperator + ?Sized,
    R: Rng + ?Sized,
{
    target.validate()?;
    let bounds = match bounds {
        Some(b) => b,
        None => Lanczos::default().bounds(c, rng)?,
    };
    bounds.validate_positive()?;
    let (derived, order) = chebyshev_parameters(target, bounds.condition_number())?;
    info!("stochastic chebyshev: using Chebyshev polynomials of order {}", order);
    let sample_size = match sample_size_override {
        Some(m) => {
            warn!(
                "stochastic chebyshev: sample size overridden ({} instead of {}); the (epsilon, zeta) guarantee no longer holds",
                m, derived
            );
            m
        }
        None => {
            info!("stochastic chebyshev: using {} samples", derived);
            derived
        }
    };
    let opts = ChebyshevOptions { sample_size, order };
    let value = logdet_stochastic_chebyshev(c, Some(bounds), &opts, rng)?;
    Ok(LogdetEstimate { value, sample_size, order })
}
