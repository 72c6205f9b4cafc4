//! Matrix-free operators from closures and from `MatVec` types.

use crate::core::traits::{Indexing, LinearOperator, MatVec};
use crate::error::{KError, check_dim};

/// A symmetric operator given only by its action `y ← A x`.
///
/// The closure is trusted to describe a symmetric matrix, so adjoint
/// application reuses it. A closure that is `Fn` also makes the operator a
/// [`MatVec`], so it can be inverted with [`ApproxInverse`](super::ApproxInverse).
pub struct FnOperator<F> {
    n: usize,
    f: F,
}

impl<F> FnOperator<F> {
    pub fn new(n: usize, f: F) -> Self {
        Self { n, f }
    }
}

impl<F> LinearOperator for FnOperator<F>
where
    F: FnMut(&[f64], &mut [f64]),
{
    fn dim(&self) -> usize {
        self.n
    }

    fn apply(&mut self, x: &[f64], y: &mut [f64]) -> Result<(), KError> {
        check_dim(self.n, x.len())?;
        check_dim(self.n, y.len())?;
        (self.f)(x, y);
        Ok(())
    }

    fn apply_adjoint(&mut self, x: &[f64], y: &mut [f64]) -> Result<(), KError> {
        self.apply(x, y)
    }
}

impl<F> MatVec<Vec<f64>> for FnOperator<F>
where
    F: Fn(&[f64], &mut [f64]),
{
    fn matvec(&self, x: &Vec<f64>, y: &mut Vec<f64>) {
        (self.f)(x.as_slice(), y.as_mut_slice());
    }
}

impl<F> Indexing for FnOperator<F> {
    fn nrows(&self) -> usize {
        self.n
    }
}

/// Adapts a square [`MatVec`] type (e.g. a user matrix type already wired for CG)
/// into a [`LinearOperator`] so the estimators can consume it.
pub struct MatVecOperator<M> {
    inner: M,
    x: Vec<f64>,
    y: Vec<f64>,
}

impl<M> MatVecOperator<M>
where
    M: MatVec<Vec<f64>> + Indexing,
{
    pub fn new(inner: M) -> Self {
        let n = inner.nrows();
        Self { inner, x: vec![0.0; n], y: vec![0.0; n] }
    }

    pub fn into_inner(self) -> M {
        self.inner
    }
}

impl<M> LinearOperator for MatVecOperator<M>
where
    M: MatVec<Vec<f64>> + Indexing,
{
    fn dim(&self) -> usize {
        self.inner.nrows()
    }

    fn apply(&mut self, x: &[f64], y: &mut [f64]) -> Result<(), KError> {
        let n = self.dim();
        check_dim(n, x.len())?;
        check_dim(n, y.len())?;
        self.x.clear();
        self.x.extend_from_slice(x);
        self.y.resize(n, 0.0);
        self.inner.matvec(&self.x, &mut self.y);
        y.copy_from_slice(&self.y);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator::ApproxInverse;
    use approx::assert_abs_diff_eq;
    use faer::Mat;

    #[test]
    fn closure_operator_applies_and_checks_lengths() {
        let mut op = FnOperator::new(3, |x: &[f64], y: &mut [f64]| {
            for i in 0..3 {
                y[i] = (i + 1) as f64 * x[i];
            }
        });
        let mut y = vec![0.0; 3];
        op.apply(&[1.0, 1.0, 1.0], &mut y).unwrap();
        assert_eq!(y, vec![1.0, 2.0, 3.0]);
        op.apply_adjoint(&[1.0, 0.0, 2.0], &mut y).unwrap();
        assert_eq!(y, vec![1.0, 0.0, 6.0]);
        assert!(op.apply(&[1.0], &mut y).is_err());
    }

    #[test]
    fn matvec_adaptor_matches_dense() {
        let a = Mat::from_fn(2, 2, |i, j| if i == j { 2.0 } else { 1.0 });
        let mut op = MatVecOperator::new(&a);
        let mut y = vec![0.0; 2];
        op.apply(&[1.0, 2.0], &mut y).unwrap();
        assert_eq!(y, vec![4.0, 5.0]);
        assert!(matches!(op.apply_adjoint(&[1.0, 2.0], &mut y), Err(KError::Unsupported(_))));
    }

    #[test]
    fn closure_operator_can_be_inverted() {
        // tridiag(-1, 4, -1) without storing the matrix
        let n = 6;
        let tri = FnOperator::new(n, move |x: &[f64], y: &mut [f64]| {
            for i in 0..n {
                let left = if i > 0 { x[i - 1] } else { 0.0 };
                let right = if i + 1 < n { x[i + 1] } else { 0.0 };
                y[i] = 4.0 * x[i] - left - right;
            }
        });
        assert_eq!(tri.nrows(), n);
        let x_true: Vec<f64> = (0..n).map(|i| i as f64 - 2.5).collect();
        let mut b = vec![0.0; n];
        tri.matvec(&x_true, &mut b);

        let mut inv = ApproxInverse::new(tri, 1e-12, 50, true);
        assert_eq!(inv.dim(), n);
        let mut y = vec![0.0; n];
        inv.apply(&b, &mut y).unwrap();
        for (yi, xi) in y.iter().zip(&x_true) {
            assert_abs_diff_eq!(*yi, *xi, epsilon = 1e-9);
        }
    }
}
