//! Extremal eigenvalue bounds for symmetric positive (semi-)definite operators.
//!
//! The stochastic Chebyshev log-determinant needs an interval `[λ_min, λ_max]`
//! containing the spectrum. Callers who know it pass [`SpectralBounds`]
//! directly; otherwise [`Lanczos`] estimates it matrix-free from the extreme
//! Ritz pairs of a fully reorthogonalized Lanczos tridiagonalization.

use crate::core::traits::{InnerProduct, LinearOperator};
use crate::error::KError;
use crate::utils::convergence::Convergence;
use crate::utils::sampling::{ProbeDistribution, probe_vector};
use faer::{Mat, Side};
use log::{debug, warn};
use rand::Rng;
/// Interval assumed to contain every eigenvalue of an operator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectralBounds {
    pub lambda_min: f64,
    pub lambda_max: f64,
}

impl SpectralBounds {
    pub fn new(lambda_min: f64, lambda_max: f64) -> Self {
        Self { lambda_min, lambda_max }
    }

    /// κ = λ_max / λ_min.
    pub fn condition_number(&self) -> f64 {
        self.lambda_max / self.lambda_min
    }

    /// Require `0 < λ_min ≤ λ_max`, both finite.
    pub fn validate_positive(&self) -> Result<(), KError> {
        let ok = self.lambda_min.is_finite()
            && self.lambda_max.is_finite()
            && self.lambda_min > 0.0
            && self.lambda_min <= self.lambda_max;
        if ok {
            Ok(())
        } else {
            Err(KError::invalid(format!(
                "spectral bounds must satisfy 0 < lambda_min <= lambda_max, got [{}, {}]",
                self.lambda_min, self.lambda_max
            )))
        }
    }
}

/// Matrix-free eigenvalue-bound oracle based on Lanczos with full reorthogonalization.
///
/// Every Ritz value lies inside the spectrum, so the extreme Ritz values alone
/// underestimate the interval. Each is widened by its residual
/// `‖A y − θ y‖ = β_k |e_kᵀ s|`, and some eigenvalue of A lies within that
/// distance of θ. A further `64 ε ‖T‖` covers rounding in the tridiagonal solve.
/// The iteration stops once both extreme residuals are below `tol·|θ|`, on an
/// invariant subspace, or after `min(n, max_iters)` steps.
/// Running out of steps is not fatal: the widened interval is returned and a
/// warning is logged.
#[derive(Clone, Debug)]
pub struct Lanczos {
    pub conv: Convergence<f64>,
}

impl Default for Lanczos {
    fn default() -> Self {
        Self::new(1e-8, 500)
    }
}

/// Extreme Ritz values of the current tridiagonal and their residual norms.
#[derive(Clone, Copy, Debug)]
struct RitzExtremes {
    theta_min: f64,
    res_min: f64,
    theta_max: f64,
    res_max: f64,
}

impl RitzExtremes {
    fn converged(&self, tol: f64) -> bool {
        self.res_min <= tol * self.theta_min.abs() && self.res_max <= tol * self.theta_max.abs()
    }
}

impl Lanczos {
    pub fn new(tol: f64, max_iters: usize) -> Self {
        Self { conv: Convergence { tol, max_iters } }
    }

    /// Estimate an interval containing the spectrum of a symmetric operator.
    pub fn bounds<O, R>(&self, op: &mut O, rng: &mut R) -> Result<SpectralBounds, KError>
    where
        O: LinearOperator + ?Sized,
        R: Rng + ?Sized,
    {
        self.conv.validate()?;
        let n = op.dim();
        if n == 0 {
            return Err(KError::invalid("cannot estimate eigenvalues of an empty operator"));
        }
        let steps = self.conv.max_iters.min(n);
        let ip = ();

        let mut v = probe_vector(ProbeDistribution::Gaussian, n, rng);
        if ip.norm(&v) == 0.0 {
            v.iter_mut().for_each(|vi| *vi = 1.0);
        }
        let v_norm = ip.norm(&v);
        v.iter_mut().for_each(|vi| *vi /= v_norm);

        let mut basis: Vec<Vec<f64>> = Vec::with_capacity(steps);
        let mut alpha: Vec<f64> = Vec::with_capacity(steps);
        let mut beta: Vec<f64> = Vec::with_capacity(steps);
        let mut w = vec![0.0; n];
        let mut next_check = steps.min(8);
        let mut ritz = None;
        let mut converged = false;
        let mut scale = 0.0f64;

        for j in 0..steps {
            basis.push(v.clone());
            op.apply(&v, &mut w)?;
            if j > 0 {
                let b = beta[j - 1];
                for (wi, pi) in w.iter_mut().zip(&basis[j - 1]) {
                    *wi -= b * pi;
                }
            }
            let a_j = ip.dot(&w, &v);
            alpha.push(a_j);
            for (wi, vi) in w.iter_mut().zip(&v) {
                *wi -= a_j * vi;
            }
            for q in &basis {
                let proj = ip.dot(&w, q);
                for (wi, qi) in w.iter_mut().zip(q) {
                    *wi -= proj * qi;
                }
            }
            let b_next = ip.norm(&w);

            scale = scale.max(a_j.abs() + beta.last().copied().unwrap_or(0.0) + b_next);
            let invariant = b_next <= 1e-14 * scale.max(f64::MIN_POSITIVE);
            let last = j + 1 == steps;
            if invariant || last || j + 1 >= next_check {
                let r = extreme_ritz(&alpha, &beta, b_next)?;
                converged = invariant || r.converged(self.conv.tol);
                ritz = Some(r);
                if converged || last {
                    break;
                }
                next_check = (next_check + next_check / 2).max(next_check + 1);
            }

            beta.push(b_next);
            for (vi, wi) in v.iter_mut().zip(&w) {
                *vi = wi / b_next;
            }
        }

        let r = ritz.ok_or_else(|| KError::invalid("Lanczos performed no steps"))?;
        if !converged {
            warn!(
                "Lanczos stopped after {} steps without converging (residuals {:.2e}, {:.2e})",
                alpha.len(),
                r.res_min,
                r.res_max
            );
        }
        let floor = 64.0 * f64::EPSILON * scale;
        let bounds = SpectralBounds::new(r.theta_min - r.res_min - floor, r.theta_max + r.res_max + floor);
        debug!(
            "Lanczos bounds after {} steps: lambda_min = {:.6e}, lambda_max = {:.6e}",
            alpha.len(),
            bounds.lambda_min,
            bounds.lambda_max
        );
        Ok(bounds)
    }
}

/// Ritz values of the k×k tridiagonal `T = tridiag(β, α, β)` at both ends of its
/// spectrum, with residual norms `β_k |U[k−1, i]|`.
fn extreme_ritz(alpha: &[f64], beta: &[f64], beta_k: f64) -> Result<RitzExtremes, KError> {
    let k = alpha.len();
    let t = Mat::from_fn(k, k, |i, j| {
        if i == j {
            alpha[i]
        } else if i == j + 1 {
            beta[j]
        } else if j == i + 1 {
            beta[i]
        } else {
            0.0
        }
    });
    let eig = t
        .self_adjoint_eigen(Side::Lower)
        .map_err(|err| KError::FactorError(format!("tridiagonal eigendecomposition failed: {err:?}")))?;
    let theta = eig.S();
    let u = eig.U();
    let (mut i_min, mut i_max) = (0, 0);
    for i in 1..k {
        if theta[i] < theta[i_min] {
            i_min = i;
        }
        if theta[i] > theta[i_max] {
            i_max = i;
        }
    }
    Ok(RitzExtremes {
        theta_min: theta[i_min],
        res_min: beta_k * u[(k - 1, i_min)].abs(),
        theta_max: theta[i_max],
        res_max: beta_k * u[(k - 1, i_max)].abs(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use faer::Mat;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn diagonal_bounds() {
        let d = [1.0, 2.0, 4.0, 8.0];
        let mut a = Mat::from_fn(4, 4, |i, j| if i == j { d[i] } else { 0.0 });
        let mut rng = StdRng::seed_from_u64(3);
        let bounds = Lanczos::default().bounds(&mut a, &mut rng).unwrap();
        assert_abs_diff_eq!(bounds.lambda_max, 8.0, epsilon = 1e-10);
        assert_abs_diff_eq!(bounds.lambda_min, 1.0, epsilon = 1e-10);
        assert_abs_diff_eq!(bounds.condition_number(), 8.0, epsilon = 1e-9);
    }

    /// KMS(n, ρ) with ρ near 1: λ_max ≈ (1+ρ)/(1−ρ), λ_min ≈ (1−ρ)/(1+ρ), and the
    /// smallest eigenvalues crowd together.
    #[test]
    fn ill_conditioned_bounds_enclose_the_spectrum() {
        let (n, rho) = (300, 0.99_f64);
        let mut a = Mat::from_fn(n, n, |i, j| rho.powi((i as i32 - j as i32).abs()));
        let eig = a.self_adjoint_eigen(Side::Lower).unwrap();
        let s = eig.S();
        let (mut true_min, mut true_max) = (f64::INFINITY, f64::NEG_INFINITY);
        for i in 0..n {
            true_min = true_min.min(s[i]);
            true_max = true_max.max(s[i]);
        }

        let mut rng = StdRng::seed_from_u64(400);
        let bounds = Lanczos::default().bounds(&mut a, &mut rng).unwrap();
        assert!(bounds.lambda_min <= true_min, "{} > {true_min}", bounds.lambda_min);
        assert!(bounds.lambda_max >= true_max, "{} < {true_max}", bounds.lambda_max);
        assert!(bounds.lambda_min > 0.0);
        assert!(true_min - bounds.lambda_min < 1e-6 * true_min);
        assert!(bounds.lambda_max - true_max < 1e-6 * true_max);
    }

    #[test]
    fn step_cap_returns_the_widened_ritz_interval() {
        // Ritz values lie in [1, 50] and every residual is at most ‖A‖ = 50
        let n = 50;
        let mut a = Mat::from_fn(n, n, |i, j| if i == j { (i + 1) as f64 } else { 0.0 });
        let mut rng = StdRng::seed_from_u64(5);
        let bounds = Lanczos::new(1e-12, 6).bounds(&mut a, &mut rng).unwrap();
        assert!(bounds.lambda_min < bounds.lambda_max);
        assert!(bounds.lambda_min >= 1.0 - 50.0 - 1e-9);
        assert!(bounds.lambda_max <= 50.0 + 50.0 + 1e-9);
    }

    #[test]
    fn invalid_settings_and_empty_operators_are_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut a = Mat::<f64>::identity(3, 3);
        assert!(matches!(Lanczos::new(0.0, 10).bounds(&mut a, &mut rng), Err(KError::InvalidArgument(_))));
        let mut empty = Mat::<f64>::zeros(0, 0);
        assert!(matches!(Lanczos::default().bounds(&mut empty, &mut rng), Err(KError::InvalidArgument(_))));
    }

    #[test]
    fn validate_rejects_nonpositive() {
        assert!(SpectralBounds::new(0.0, 1.0).validate_positive().is_err());
        assert!(SpectralBounds::new(2.0, 1.0).validate_positive().is_err());
        assert!(SpectralBounds::new(1.0, 1.0).validate_positive().is_ok());
    }
}
