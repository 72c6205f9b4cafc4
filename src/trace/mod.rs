//! Stochastic trace estimators for symmetric positive semi-definite operators.
//!
//! - [`hutchinson`]: the Hutchinson estimator, processed in blocks of probes, and its
//!   (ε,δ) variant with a sample size chosen from a concentration bound.
//! - [`hutchpp`]: Hutch++, which takes the trace of a captured low-rank subspace
//!   exactly and runs Hutchinson only on its orthogonal complement.
//! - [`explicit`]: the exact trace from n basis-vector applications, for validation.

use faer::Mat;

pub mod explicit;
pub mod hutchinson;
pub mod hutchpp;

pub use explicit::explicit_trace;
pub use hutchinson::{hutchinson_epsilon_delta_trace, hutchinson_sample_size, hutchinson_trace};
pub use hutchpp::{hutch_plus_plus_epsilon_delta_trace, hutch_plus_plus_sample_size, hutch_plus_plus_trace};

/// A trace estimate together with the number of probes that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceEstimate {
    pub value: f64,
    pub sample_size: usize,
}

/// tr(Xᵀ Y) = Σᵢⱼ X[i,j]·Y[i,j], i.e. the sum over columns of xⱼ·yⱼ.
pub(crate) fn trace_of_product(x: &Mat<f64>, y: &Mat<f64>) -> f64 {
    debug_assert_eq!(x.nrows(), y.nrows());
    debug_assert_eq!(x.ncols(), y.ncols());
    let mut acc = 0.0;
    for j in 0..x.ncols() {
        for i in 0..x.nrows() {
            acc += x[(i, j)] * y[(i, j)];
        }
    }
    acc
}
