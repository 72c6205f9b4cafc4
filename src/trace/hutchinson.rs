//! Hutchinson trace estimator.
//!
//! tr(A) ≈ (1/m) Σᵢ wᵢᵀ A wᵢ over m independent probes. Probes are drawn and
//! applied `block_size` at a time to bound peak memory. Unless
//! `exact_sample_size` is set, the last block is not trimmed, so up to
//! `block_size − 1` extra probes may be used; the divisor is always the number
//! of probes actually used.

use crate::config::options::derived_size;
use crate::config::{EpsilonDelta, HutchinsonOptions};
use crate::core::traits::LinearOperator;
use crate::error::KError;
use crate::trace::{TraceEstimate, trace_of_product};
use crate::utils::sampling::{ProbeDistribution, probe_block};
use log::{debug, info, warn};
use rand::Rng;

/// Hutchinson estimate of tr(A). A must be symmetric positive semi-definite.
pub fn hutchinson_trace<O, R>(a: &mut O, opts: &HutchinsonOptions, rng: &mut R) -> Result<f64, KError>
where
    O: LinearOperator + ?Sized,
    R: Rng + ?Sized,
{
    opts.validate()?;
    let n = a.dim();
    let n_blocks = opts.sample_size.div_ceil(opts.block_size);
    let extra = opts.block_size * n_blocks - opts.sample_size;

    let mut total = 0.0;
    let mut used = 0usize;
    for j in 0..n_blocks {
        let width = if j + 1 == n_blocks && opts.exact_sample_size {
            opts.block_size - extra
        } else {
            opts.block_size
        };
        let w = probe_block(opts.distribution, n, width, rng);
        let aw = a.apply_block(w.as_ref())?;
        total += trace_of_product(&w, &aw);
        used += width;
    }

    debug!(
        "hutchinson: {} probes ({} requested) in {} blocks of {}, {}",
        used, opts.sample_size, n_blocks, opts.block_size, opts.distribution
    );
    Ok(total / used as f64)
}

/// Sample size guaranteeing |estimate − tr(A)| < ε·tr(A) with probability ≥ 1 − δ:
/// ⌈8c⌉ for Gaussian and ⌈6c⌉ for Rademacher probes, with c = ln(2/δ)/ε².
pub fn hutchinson_sample_size(target: EpsilonDelta, distribution: ProbeDistribution) -> Result<usize, KError> {
    target.validate()?;
    let c = (2.0 / target.delta).ln() / (target.epsilon * target.epsilon);
    let factor = match distribution {
        ProbeDistribution::Gaussian => 8.0,
        ProbeDistribution::Rademacher => 6.0,
    };
    derived_size(factor * c, "sample size")
}

/// (ε,δ) Hutchinson estimate of tr(A) for symmetric positive semi-definite A.
///
/// The guarantee holds only with the derived sample size. Passing
/// `sample_size_override` is allowed, since the bound is conservative, but it
/// forfeits the guarantee and is logged as a warning.
pub fn hutchinson_epsilon_delta_trace<O, R>(
    a: &mut O,
    target: EpsilonDelta,
    distribution: ProbeDistribution,
    block_size: usize,
    sample_size_override: Option<usize>,
    rng: &mut R,
) -> Result<TraceEstimate, KError>
where
    O: LinearOperator + ?Sized,
    R: Rng + ?Sized,
{
    let derived = hutchinson_sample_size(target, distribution)?;
    let sample_size = match sample_size_override {
        Some(m) => {
            warn!(
                "hutchinson: sample size overridden ({} instead of {}); the (epsilon, delta) guarantee no longer holds",
                m, derived
            );
            m
        }
        None => {
            info!(
                "hutchinson: using {} samples for epsilon = {}, delta = {}",
                derived, target.epsilon, target.delta
            );
            derived
        }
    };
    let opts = HutchinsonOptions { sample_size, block_size, distribution, exact_sample_size: false };
    let value = hutchinson_trace(a, &opts, rng)?;
    Ok(TraceEstimate { value, sample_size })
}
