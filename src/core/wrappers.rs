//! Wrappers for faer dense matrix types and vector operations.
//!
//! This module implements the core traits for `faer::Mat`, `faer::MatRef` and `Vec<T>`,
//! so that dense matrices can be handed directly to the CG solver (through [`MatVec`])
//! and to every estimator (through [`LinearOperator`]).
//!
//! # Features
//! - Matrix-vector multiplication for `faer` dense matrices.
//! - Inner product and norm operations for vectors, with optional Rayon parallelism.
//! - Block application `Y = A X` routed through faer's dense product.
//!
//! # References
//! - [faer crate documentation](https://docs.rs/faer)
//! - [num-traits crate documentation](https://docs.rs/num-traits)

use crate::core::traits::{Indexing, InnerProduct, LinearOperator, MatVec};
use crate::error::{KError, check_dim};
use faer::{Mat, MatRef};
use num_traits::Float;

/// Implements matrix-vector multiplication for `faer::Mat`.
///
/// Computes `y = A * x` where `A` is a dense matrix, `x` and `y` are vectors.
impl<T: Float> MatVec<Vec<T>> for Mat<T> {
    fn matvec(&self, x: &Vec<T>, y: &mut Vec<T>) {
        self.as_ref().matvec(x, y)
    }
}

/// Implements matrix-vector multiplication for a matrix reference (`faer::MatRef`).
impl<'a, T: Float> MatVec<Vec<T>> for MatRef<'a, T> {
    fn matvec(&self, x: &Vec<T>, y: &mut Vec<T>) {
        assert_eq!(self.nrows(), y.len(), "Output vector y has incorrect length");
        assert_eq!(self.ncols(), x.len(), "Input vector x has incorrect length");
        for i in 0..self.nrows() {
            y[i] = T::zero();
            for j in 0..self.ncols() {
                y[i] = y[i] + self[(i, j)] * x[j];
            }
        }
    }
}

/// Implements inner product and norm for vectors, with optional Rayon parallelism.
///
/// If the `rayon` feature is enabled, uses parallel iterators for performance.
impl<T: Float + From<f64> + Send + Sync> InnerProduct<Vec<T>> for () {
    type Scalar = T;
    /// Computes the dot product of two vectors: `x^T y`.
    fn dot(&self, x: &Vec<T>, y: &Vec<T>) -> T {
        assert_eq!(x.len(), y.len(), "Vectors must have the same length");
        #[cfg(feature = "rayon")]
        {
            use rayon::prelude::*;
            x.as_slice()
                .par_iter()
                .zip(y.as_slice().par_iter())
                .map(|(xi, yi)| *xi * *yi)
                .reduce(|| T::zero(), |acc, v| acc + v)
        }
        #[cfg(not(feature = "rayon"))]
        {
            x.iter()
                .zip(y.iter())
                .map(|(xi, yi)| *xi * *yi)
                .fold(T::zero(), |acc, v| acc + v)
        }
    }
    /// Computes the Euclidean norm of a vector: `||x||_2`.
    fn norm(&self, x: &Vec<T>) -> T {
        #[cfg(feature = "rayon")]
        {
            use rayon::prelude::*;
            x.as_slice()
                .par_iter()
                .map(|xi| *xi * *xi)
                .reduce(|| T::zero(), |acc, v| acc + v)
                .sqrt()
        }
        #[cfg(not(feature = "rayon"))]
        {
            x.iter()
                .map(|xi| *xi * *xi)
                .fold(T::zero(), |acc, v| acc + v)
                .sqrt()
        }
    }
}

/// Implements the `Indexing` trait for `Vec<T>`, treating a vector as a column vector.
impl<T> Indexing for Vec<T> {
    /// Returns the number of rows (length) of the vector.
    fn nrows(&self) -> usize {
        self.len()
    }
}

/// Implements the `Indexing` trait for `faer::Mat`, returning the number of rows.
impl<T> Indexing for Mat<T> {
    fn nrows(&self) -> usize {
        self.nrows()
    }
}

/// A dense square `faer::Mat<f64>` is the simplest [`LinearOperator`].
///
/// Single products are computed with a plain row loop, block products with faer's
/// dense matmul. A non-square matrix is rejected with `DimensionMismatch`.
impl LinearOperator for Mat<f64> {
    fn dim(&self) -> usize {
        self.nrows()
    }

    fn apply(&mut self, x: &[f64], y: &mut [f64]) -> Result<(), KError> {
        check_dim(self.nrows(), self.ncols())?;
        check_dim(self.ncols(), x.len())?;
        check_dim(self.nrows(), y.len())?;
        for i in 0..self.nrows() {
            let mut acc = 0.0;
            for j in 0..self.ncols() {
                acc += self[(i, j)] * x[j];
            }
            y[i] = acc;
        }
        Ok(())
    }

    fn apply_block(&mut self, x: MatRef<'_, f64>) -> Result<Mat<f64>, KError> {
        check_dim(self.nrows(), self.ncols())?;
        check_dim(self.ncols(), x.nrows())?;
        Ok(self.as_ref() * x)
    }

    fn apply_adjoint(&mut self, x: &[f64], y: &mut [f64]) -> Result<(), KError> {
        check_dim(self.nrows(), self.ncols())?;
        check_dim(self.nrows(), x.len())?;
        check_dim(self.ncols(), y.len())?;
        for j in 0..self.ncols() {
            let mut acc = 0.0;
            for i in 0..self.nrows() {
                acc += self[(i, j)] * x[i];
            }
            y[j] = acc;
        }
        Ok(())
    }

    fn apply_adjoint_block(&mut self, x: MatRef<'_, f64>) -> Result<Mat<f64>, KError> {
        check_dim(self.nrows(), self.ncols())?;
        check_dim(self.nrows(), x.nrows())?;
        Ok(self.transpose() * x)
    }
}
