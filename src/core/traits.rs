//! Core linear-algebra traits for tracelogdet.
//!
//! Two operator contracts live here. [`MatVec`] is the infallible, read-only
//! product consumed by the conjugate-gradient solver. [`LinearOperator`] is the
//! square, possibly stateful and fallible operator consumed by the estimators;
//! the CG-backed approximate inverse is the reason it takes `&mut self`.

use crate::error::{KError, check_dim};
use faer::{Mat, MatRef};

/// Matrix–vector product: y ← A x.
pub trait MatVec<V> {
    /// Compute y = A · x.
    fn matvec(&self, x: &V, y: &mut V);
}

impl<V, M: MatVec<V> + ?Sized> MatVec<V> for &M {
    fn matvec(&self, x: &V, y: &mut V) {
        (**self).matvec(x, y)
    }
}

/// Inner products & norms.
pub trait InnerProduct<V> {
    /// Associated scalar type.
    type Scalar: Copy + PartialOrd + From<f64>;
    /// Compute dot(x, y).
    fn dot(&self, x: &V, y: &V) -> Self::Scalar;
    /// Compute ‖x‖₂.
    fn norm(&self, x: &V) -> Self::Scalar;
}

/// Uniform indexing into vectors and matrices.
pub trait Indexing {
    /// Number of rows (or length for a vector).
    fn nrows(&self) -> usize;
}

impl<M: Indexing + ?Sized> Indexing for &M {
    fn nrows(&self) -> usize {
        (**self).nrows()
    }
}

/// A square operator A: ℝⁿ → ℝⁿ known only through its action on vectors.
///
/// Every estimator in this crate reads the matrix exclusively through this
/// trait. Implementations may keep internal state between applications (see
/// [`crate::operator::ApproxInverse`]), which is why application takes
/// `&mut self`: exclusive access is required for the duration of a call.
pub trait LinearOperator {
    /// Dimension n of the operator.
    fn dim(&self) -> usize;

    /// Compute y = A x. Both slices have length [`dim`](Self::dim).
    fn apply(&mut self, x: &[f64], y: &mut [f64]) -> Result<(), KError>;

    /// Compute Y = A X column by column.
    fn apply_block(&mut self, x: MatRef<'_, f64>) -> Result<Mat<f64>, KError> {
        let n = self.dim();
        check_dim(n, x.nrows())?;
        let mut out = Mat::<f64>::zeros(n, x.ncols());
        let mut xj = vec![0.0; n];
        let mut yj = vec![0.0; n];
        for j in 0..x.ncols() {
            for i in 0..n {
                xj[i] = x[(i, j)];
            }
            self.apply(&xj, &mut yj)?;
            for i in 0..n {
                out[(i, j)] = yj[i];
            }
        }
        Ok(out)
    }

    /// Compute y = Aᵀ x.
    fn apply_adjoint(&mut self, _x: &[f64], _y: &mut [f64]) -> Result<(), KError> {
        Err(KError::Unsupported("adjoint application"))
    }

    /// Compute Y = Aᵀ X column by column.
    fn apply_adjoint_block(&mut self, x: MatRef<'_, f64>) -> Result<Mat<f64>, KError> {
        let n = self.dim();
        check_dim(n, x.nrows())?;
        let mut out = Mat::<f64>::zeros(n, x.ncols());
        let mut xj = vec![0.0; n];
        let mut yj = vec![0.0; n];
        for j in 0..x.ncols() {
            for i in 0..n {
                xj[i] = x[(i, j)];
            }
            self.apply_adjoint(&xj, &mut yj)?;
            for i in 0..n {
                out[(i, j)] = yj[i];
            }
        }
        Ok(out)
    }
}

impl<O: LinearOperator + ?Sized> LinearOperator for &mut O {
    fn dim(&self) -> usize {
        (**self).dim()
    }

    fn apply(&mut self, x: &[f64], y: &mut [f64]) -> Result<(), KError> {
        (**self).apply(x, y)
    }

    fn apply_block(&mut self, x: MatRef<'_, f64>) -> Result<Mat<f64>, KError> {
        (**self).apply_block(x)
    }

    fn apply_adjoint(&mut self, x: &[f64], y: &mut [f64]) -> Result<(), KError> {
        (**self).apply_adjoint(x, y)
    }

    fn apply_adjoint_block(&mut self, x: MatRef<'_, f64>) -> Result<Mat<f64>, KError> {
        (**self).apply_adjoint_block(x)
    }
}
