//! Krylov solver interfaces.

use crate::utils::convergence::SolveStats;

/// Common interface for iterative linear solvers.
pub trait LinearSolver<M, V> {
    type Error;
    /// Solve A·x = b. On entry `x` holds the initial guess, on success the solution.
    /// Returns iteration stats (including convergence info).
    fn solve(
        &mut self,
        a: &M,
        b: &V,
        x: &mut V,
    ) -> Result<SolveStats<<Self as LinearSolver<M, V>>::Scalar>, Self::Error>;
    type Scalar: Copy + PartialOrd + From<f64>;
}

pub mod cg;
pub use cg::CgSolver;
