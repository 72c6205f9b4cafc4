//! Log-determinant estimation for symmetric positive definite operators.

pub mod chebyshev;
pub mod direct;
pub mod stochastic;

pub use chebyshev::{ChebyshevExpansion, chebyshev_coefficient, chebyshev_nodes, chebyshev_t, evaluate_chebyshev_polynomial};
pub use direct::{diaginv_cholesky, logdet_cholesky};
pub use stochastic::{
    LogdetEstimate, chebyshev_parameters, logdet_stochastic_chebyshev, logdet_stochastic_chebyshev_epsilon_delta,
};
