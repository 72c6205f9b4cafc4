//! Dense Cholesky references for small problems.
//!
//! These factor A explicitly, so they are O(n³) and only meant for checking the
//! stochastic estimators or for matrices small enough to factor outright.

use crate::error::{KError, check_dim};
use faer::linalg::solvers::{Llt, Solve};
use faer::{Mat, Side};

fn factor(a: &Mat<f64>) -> Result<Llt<f64>, KError> {
    check_dim(a.nrows(), a.ncols())?;
    Llt::new(a.as_ref(), Side::Lower)
        .map_err(|e| KError::FactorError(format!("Cholesky factorization failed: {e:?}")))
}

/// logdet(A) = 2 Σᵢ ln Lᵢᵢ for A = L Lᵀ symmetric positive definite.
pub fn logdet_cholesky(a: &Mat<f64>) -> Result<f64, KError> {
    let chol = factor(a)?;
    let l = chol.L();
    Ok(2.0 * (0..l.nrows()).map(|i| l[(i, i)].ln()).sum::<f64>())
}

/// diag(A⁻¹) for A symmetric positive definite, solving against the identity.
pub fn diaginv_cholesky(a: &Mat<f64>) -> Result<Vec<f64>, KError> {
    let chol = factor(a)?;
    let n = a.nrows();
    let mut inv = Mat::<f64>::identity(n, n);
    chol.solve_in_place(inv.as_mut());
    Ok((0..n).map(|i| inv[(i, i)]).collect())
}
