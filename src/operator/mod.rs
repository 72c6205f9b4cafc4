//! Concrete [`LinearOperator`](crate::core::LinearOperator) implementations.
//!
//! - [`FnOperator`]: a matrix-free operator defined by a closure.
//! - [`MatVecOperator`]: lifts any [`MatVec`](crate::core::MatVec) type into a `LinearOperator`.
//! - [`ApproxInverse`]: A⁻¹ applied through conjugate gradients, with warm starts.

pub mod approx_inverse;
pub mod function;

pub use approx_inverse::ApproxInverse;
pub use function::{FnOperator, MatVecOperator};
