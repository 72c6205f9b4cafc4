//! Options for the solver and the estimators.

pub mod options;

pub use options::{
    CgOptions, ChebyshevOptions, DiagonalOptions, EpsilonDelta, HutchPlusPlusOptions,
    HutchinsonOptions, MAX_DERIVED_SIZE,
};
