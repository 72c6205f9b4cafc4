//! Matrix-free approximate inverse A⁻¹ through conjugate gradients.
//!
//! Every application `y = A⁻¹ x` is a CG solve of `A y = x`. With warm starting
//! enabled, the solution of one application seeds the next, which pays off when
//! the right-hand sides are similar, as with blocks of probe vectors fed to a
//! trace or diagonal estimator. The seed only changes how fast CG converges,
//! never the converged answer.
//!
//! The seed is an owned cache mutated on every call, so applications take
//! `&mut self`; sharing one operator between threads requires external locking.
//!
//! A must be symmetric positive definite, hence A⁻¹ is too and the adjoint
//! application is the forward application.

use crate::config::CgOptions;
use crate::core::traits::{Indexing, LinearOperator, MatVec};
use crate::error::{KError, check_dim};
use crate::solver::{CgSolver, LinearSolver};
use crate::utils::convergence::SolveStats;
use faer::{Mat, MatRef};
use log::trace;

pub struct ApproxInverse<M> {
    /// The SPD operator being inverted.
    a: M,
    solver: CgSolver<f64>,
    /// Reuse the previous solution as the next initial guess.
    use_prev: bool,
    /// Last solution, `None` until the first application.
    x0: Option<Vec<f64>>,
    last_stats: Option<SolveStats<f64>>,
    total_iterations: usize,
}

impl<M> ApproxInverse<M>
where
    M: MatVec<Vec<f64>> + Indexing,
{
    /// `cg_tol` must be a positive finite number and `cg_maxits` at least 1;
    /// otherwise the first application fails with [`KError::InvalidArgument`].
    pub fn new(a: M, cg_tol: f64, cg_maxits: usize, use_prev: bool) -> Self {
        Self {
            a,
            solver: CgSolver::new(cg_tol, cg_maxits),
            use_prev,
            x0: None,
            last_stats: None,
            total_iterations: 0,
        }
    }

    pub fn with_options(a: M, opts: &CgOptions) -> Self {
        Self::new(a, opts.tol, opts.max_iters, opts.use_prev)
    }

    /// Forget the warm-start seed; the next solve starts from the all-ones vector.
    pub fn reset(&mut self) {
        self.x0 = None;
    }

    /// Stats of the most recent CG solve.
    pub fn last_stats(&self) -> Option<&SolveStats<f64>> {
        self.last_stats.as_ref()
    }

    /// CG iterations spent over the operator's lifetime.
    pub fn total_iterations(&self) -> usize {
        self.total_iterations
    }

    pub fn warm_start(&self) -> Option<&[f64]> {
        self.x0.as_deref()
    }

    pub fn inner(&self) -> &M {
        &self.a
    }
}

impl<M> LinearOperator for ApproxInverse<M>
where
    M: MatVec<Vec<f64>> + Indexing,
{
    fn dim(&self) -> usize {
        self.a.nrows()
    }

    fn apply(&mut self, x: &[f64], y: &mut [f64]) -> Result<(), KError> {
        let n = self.dim();
        check_dim(n, x.len())?;
        check_dim(n, y.len())?;
        let b = x.to_vec();
        let mut sol = match &self.x0 {
            Some(prev) => {
                trace!("approximate inverse: warm start from previous solution");
                prev.clone()
            }
            None => vec![1.0; n],
        };
        let stats = self.solver.solve(&self.a, &b, &mut sol)?;
        self.total_iterations += stats.iterations;
        self.last_stats = Some(stats);
        y.copy_from_slice(&sol);
        if self.use_prev {
            self.x0 = Some(sol);
        }
        Ok(())
    }

    fn apply_adjoint(&mut self, x: &[f64], y: &mut [f64]) -> Result<(), KError> {
        self.apply(x, y)
    }

    fn apply_adjoint_block(&mut self, x: MatRef<'_, f64>) -> Result<Mat<f64>, KError> {
        self.apply_block(x)
    }
}
