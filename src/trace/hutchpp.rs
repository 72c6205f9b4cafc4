//! Hutch++ trace estimator (Meyer, Musco, Musco & Woodruff, 2021).
//!
//! With a budget of m matrix-vector products split into three blocks of
//! k = m/3 probes S and G:
//!
//! 1. Q = orthonormal basis of range(A S), from a thin QR factorization.
//! 2. tr(Qᵀ A Q) is the exact trace of A on span(Q).
//! 3. Hutchinson with G on the complement: (3/m)·tr(Gᵀ (I − QQᵀ) A (I − QQᵀ) G).
//!
//! When A has a few dominant eigenvalues, step 2 captures them exactly and the
//! stochastic part only sees the small remainder.

use crate::config::options::derived_size;
use crate::config::{EpsilonDelta, HutchPlusPlusOptions};
use crate::core::traits::LinearOperator;
use crate::error::KError;
use crate::trace::{TraceEstimate, trace_of_product};
use crate::utils::sampling::{ProbeDistribution, probe_block};
use faer::linalg::solvers::Qr;
use faer::{Mat, MatRef};
use log::{debug, info, warn};
use rand::Rng;

/// Orthonormal basis of the column space of `y` (thin Q factor).
fn orthonormal_basis(y: MatRef<'_, f64>) -> Mat<f64> {
    Qr::new(y).compute_thin_Q()
}

/// Hutch++ estimate of tr(A). A must be symmetric positive semi-definite and
/// `sample_size` a positive multiple of 3.
pub fn hutch_plus_plus_trace<O, R>(a: &mut O, opts: &HutchPlusPlusOptions, rng: &mut R) -> Result<f64, KError>
where
    O: LinearOperator + ?Sized,
    R: Rng + ?Sized,
{
    opts.validate()?;
    let n = a.dim();
    let k = opts.sample_size / 3;

    let s = probe_block(opts.distribution, n, k, rng);
    let g = probe_block(opts.distribution, n, k, rng);

    let a_s = a.apply_block(s.as_ref())?;
    let q = orthonormal_basis(a_s.as_ref());
    let qt = q.transpose();

    let a_q = a.apply_block(q.as_ref())?;
    let term1 = trace_of_product(&q, &a_q);

    // G' = (I − QQᵀ) G
    let qt_g = &qt * &g;
    let q_qt_g = &q * &qt_g;
    let g_perp = &g - &q_qt_g;

    // (I − QQᵀ) A G'
    let a_gp = a.apply_block(g_perp.as_ref())?;
    let qt_agp = &qt * &a_gp;
    let q_qt_agp = &q * &qt_agp;
    let projected = &a_gp - &q_qt_agp;

    let term2 = 3.0 / opts.sample_size as f64 * trace_of_product(&g, &projected);

    debug!(
        "hutch++: budget {}, subspace rank {}, low-rank term {:.6e}, correction {:.6e}",
        opts.sample_size,
        q.ncols(),
        term1,
        term2
    );
    Ok(term1 + term2)
}

/// Hutch++ budget for relative error ε with probability ≥ 1 − δ:
/// 3·⌈(√ln(1/δ)/ε + ln(1/δ))/3⌉.
pub fn hutch_plus_plus_sample_size(target: EpsilonDelta) -> Result<usize, KError> {
    target.validate()?;
    let log_term = (1.0 / target.delta).ln();
    let raw = log_term.sqrt() / target.epsilon + log_term;
    Ok(3 * derived_size(raw / 3.0, "sample size")?)
}

/// (ε,δ) Hutch++ estimate of tr(A) for symmetric positive semi-definite A.
///
/// An override must still be a multiple of 3 and forfeits the guarantee.
pub fn hutch_plus_plus_epsilon_delta_trace<O, R>(
    a: &mut O,
    target: EpsilonDelta,
    distribution: ProbeDistribution,
    sample_size_override: Option<usize>,
    rng: &mut R,
) -> Result<TraceEstimate, KError>
where
    O: LinearOperator + ?Sized,
    R: Rng + ?Sized,
{
    let derived = hutch_plus_plus_sample_size(target)?;
    let sample_size = match sample_size_override {
        Some(m) => {
            warn!(
                "hutch++: sample size overridden ({} instead of {}); the (epsilon, delta) guarantee no longer holds",
                m, derived
            );
            m
        }
        None => {
            info!(
                "hutch++: using {} samples for epsilon = {}, delta = {}",
                derived, target.epsilon, target.delta
            );
            derived
        }
    };
    let opts = HutchPlusPlusOptions { sample_size, distribution };
    let value = hutch_plus_plus_trace(a, &opts, rng)?;
    Ok(TraceEstimate { value, sample_size })
}
