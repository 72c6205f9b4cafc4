use crate::core::traits::LinearOperator;
use crate::error::KError;

/// Exact diag(A) from n applications to the standard basis vectors.
pub fn explicit_diagonal<O: LinearOperator + ?Sized>(a: &mut O) -> Result<Vec<f64>, KError> {
    let n = a.dim();
    let mut e = vec![0.0; n];
    let mut col = vec![0.0; n];
    let mut diag = Vec::with_capacity(n);
    for i in 0..n {
        e[i] = 1.0;
        a.apply(&e, &mut col)?;
        diag.push(col[i]);
        e[i] = 0.0;
    }
    Ok(diag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator::ApproxInverse;
    use approx::assert_abs_diff_eq;
    use faer::Mat;

    #[test]
    fn reads_the_diagonal() {
        let mut a = Mat::from_fn(3, 3, |i, j| (1 + i * 3 + j) as f64);
        assert_eq!(explicit_diagonal(&mut a).unwrap(), vec![1.0, 5.0, 9.0]);
    }

    #[test]
    fn diagonal_of_inverse_through_cg() {
        // A⁻¹ = [3 −1; −1 4]/11
        let a = Mat::from_fn(2, 2, |i, j| [[4.0, 1.0], [1.0, 3.0]][i][j]);
        let mut inv = ApproxInverse::new(&a, 1e-12, 50, true);
        let d = explicit_diagonal(&mut inv).unwrap();
        assert_abs_diff_eq!(d[0], 3.0 / 11.0, epsilon = 1e-10);
        assert_abs_diff_eq!(d[1], 4.0 / 11.0, epsilon = 1e-10);
    }
}
