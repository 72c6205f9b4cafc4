//! Exact trace from standard basis vectors: tr(A) = Σᵢ eᵢᵀ A eᵢ.
//!
//! Costs n applications of A; meant as a reference value for small problems.

use crate::core::traits::LinearOperator;
use crate::error::KError;

pub fn explicit_trace<O: LinearOperator + ?Sized>(a: &mut O) -> Result<f64, KError> {
    let n = a.dim();
    let mut e = vec![0.0; n];
    let mut col = vec![0.0; n];
    let mut trace = 0.0;
    for i in 0..n {
        e[i] = 1.0;
        a.apply(&e, &mut col)?;
        trace += col[i];
        e[i] = 0.0;
    }
    Ok(trace)
}
