//! Diagonal estimation, of A or (through [`ApproxInverse`](crate::operator::ApproxInverse)) of A⁻¹.

pub mod explicit;
pub mod stochastic;

pub use explicit::explicit_diagonal;
pub use stochastic::{stochastic_diagonal, stochastic_inverse_diagonal};
