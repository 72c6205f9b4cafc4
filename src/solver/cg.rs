//! Conjugate Gradient (unpreconditioned) per Saad §6.1.
//!
//! Convergence is judged on the true relative residual ‖b − A x‖ / ‖b‖, recomputed
//! from scratch after every update rather than taken from the recursively updated
//! residual. Running out of iterations is an error, never a best-effort answer.

use crate::core::traits::{Indexing, InnerProduct, MatVec};
use crate::error::{KError, check_dim};
use crate::solver::LinearSolver;
use crate::utils::convergence::{Convergence, SolveStats};
use log::debug;
use num_traits::Float;

#[derive(Clone, Debug)]
pub struct CgSolver<T> {
    pub conv: Convergence<T>,
}

impl<T: Copy + Float> CgSolver<T> {
    pub fn new(tol: T, max_iters: usize) -> Self {
        Self { conv: Convergence { tol, max_iters } }
    }
}

impl<T: Float + From<f64>> Default for CgSolver<T> {
    fn default() -> Self {
        Self::new(<T as From<f64>>::from(1e-8), 1000)
    }
}

impl<T: Float + From<f64>> CgSolver<T> {
    /// Solve A·x = b starting from `x0`, or from the all-ones vector when `x0` is `None`.
    ///
    /// The non-zero default keeps the first residual away from a degenerate zero.
    pub fn solve_from<M, V>(&mut self, a: &M, b: &V, x0: Option<&V>) -> Result<(V, SolveStats<T>), KError>
    where
        M: MatVec<V> + Indexing,
        (): InnerProduct<V, Scalar = T>,
        V: AsMut<[T]> + AsRef<[T]> + From<Vec<T>> + Clone,
    {
        let n = b.as_ref().len();
        let mut x = match x0 {
            Some(x0) => x0.clone(),
            None => V::from(vec![T::one(); n]),
        };
        let stats = LinearSolver::<M, V>::solve(self, a, b, &mut x)?;
        Ok((x, stats))
    }
}

impl<M, V, T> LinearSolver<M, V> for CgSolver<T>
where
    M: MatVec<V> + Indexing,
    (): InnerProduct<V, Scalar = T>,
    V: AsMut<[T]> + AsRef<[T]> + From<Vec<T>> + Clone,
    T: Float + From<f64>,
{
    type Error = KError;
    type Scalar = T;

    fn solve(&mut self, a: &M, b: &V, x: &mut V) -> Result<SolveStats<T>, KError> {
        self.conv.validate()?;
        let n = b.as_ref().len();
        check_dim(a.nrows(), n)?;
        check_dim(n, x.as_ref().len())?;
        let ip = ();
        let b_norm = ip.norm(b);
        if b_norm <= T::min_positive_value() {
            // A x = 0 with A SPD has the unique solution x = 0.
            x.as_mut().iter_mut().for_each(|xi| *xi = T::zero());
            debug!("CG: zero right-hand side, returning the zero vector");
            return Ok(SolveStats { iterations: 0, final_residual: T::zero(), converged: true });
        }

        let mut ax = V::from(vec![T::zero(); n]);
        a.matvec(x, &mut ax);
        let mut r = {
            let r_vec = ax.as_ref().iter().zip(b.as_ref()).map(|(&axi, &bi)| bi - axi).collect::<Vec<_>>();
            V::from(r_vec)
        };
        let (_, mut stats) = self.conv.check(ip.norm(&r), b_norm, 0);
        if stats.converged {
            debug!("CG: initial guess already within tolerance");
            return Ok(stats);
        }

        let mut d = r.clone();
        let mut rsq = ip.dot(&r, &r);
        let mut ad = V::from(vec![T::zero(); n]);
        let mut true_r = V::from(vec![T::zero(); n]);
        for i in 1..=self.conv.max_iters {
            a.matvec(&d, &mut ad);
            let d_ad = ip.dot(&d, &ad);
            if d_ad <= T::zero() {
                return Err(KError::IndefiniteMatrix);
            }
            let alpha = rsq / d_ad;
            for (xj, dj) in x.as_mut().iter_mut().zip(d.as_ref()) {
                *xj = *xj + alpha * *dj;
            }
            for (rj, adj) in r.as_mut().iter_mut().zip(ad.as_ref()) {
                *rj = *rj - alpha * *adj;
            }
            let rsq_new = ip.dot(&r, &r);
            let beta = rsq_new / rsq;
            for (dj, rj) in d.as_mut().iter_mut().zip(r.as_ref()) {
                *dj = *rj + beta * *dj;
            }
            rsq = rsq_new;

            a.matvec(x, &mut ax);
            for ((tj, &bj), &axj) in true_r.as_mut().iter_mut().zip(b.as_ref()).zip(ax.as_ref()) {
                *tj = bj - axj;
            }
            let (stop, s) = self.conv.check(ip.norm(&true_r), b_norm, i);
            stats = s;
            if stop {
                break;
            }
        }

        if stats.converged {
            debug!(
                "CG converged in {} iterations (relative residual {:.3e})",
                stats.iterations,
                stats.final_residual.to_f64().unwrap_or(f64::NAN)
            );
            Ok(stats)
        } else {
            Err(KError::ConvergenceFailure {
                iterations: stats.iterations,
                residual: stats.final_residual.to_f64().unwrap_or(f64::NAN),
            })
        }
    }
}
