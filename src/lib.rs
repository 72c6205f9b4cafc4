//! tracelogdet: matrix-free randomized estimators of trace, diagonal and log-determinant over Faer
//!
//! Every estimator only needs the action x ↦ A x of a symmetric positive
//! (semi-)definite operator, supplied through [`LinearOperator`]. Dense faer
//! matrices and closures implement it directly, and [`ApproxInverse`] applies
//! A⁻¹ by warm-started conjugate gradients, so the same estimators work on the
//! inverse without forming it.
//!
//! Randomness always comes from a caller-supplied [`rand::Rng`].

pub mod config;
pub mod context;
pub mod core;
pub mod diag;
pub mod error;
pub mod logdet;
pub mod operator;
pub mod solver;
pub mod trace;
pub mod utils;

// Re-exports for convenience
pub use config::*;
pub use core::*;
pub use error::*;
pub use utils::*;

pub use context::{LogdetContext, LogdetKind, TraceContext, TraceKind};
pub use diag::{explicit_diagonal, stochastic_diagonal, stochastic_inverse_diagonal};
pub use logdet::{
    LogdetEstimate, chebyshev_parameters, diaginv_cholesky, logdet_cholesky, logdet_stochastic_chebyshev,
    logdet_stochastic_chebyshev_epsilon_delta,
};
pub use operator::{ApproxInverse, FnOperator, MatVecOperator};
pub use solver::{CgSolver, LinearSolver};
pub use trace::{
    TraceEstimate, explicit_trace, hutch_plus_plus_epsilon_delta_trace, hutch_plus_plus_sample_size,
    hutch_plus_plus_trace, hutchinson_epsilon_delta_trace, hutchinson_sample_size, hutchinson_trace,
};
