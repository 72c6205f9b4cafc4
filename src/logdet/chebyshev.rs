//! Chebyshev polynomials of the first kind and discrete Chebyshev expansions on [-1, 1].

use num_traits::Float;
use std::f64::consts::PI;

/// T_m(x) by the three-term recurrence T₀ = 1, T₁ = x, T_k = 2x·T_{k−1} − T_{k−2}.
pub fn chebyshev_t<T: Float>(m: usize, x: T) -> T {
    if m == 0 {
        T::one()
    } else if m == 1 {
        x
    } else {
        let two = T::one() + T::one();
        let mut t0 = T::one();
        let mut t1 = x;
        let mut t2;
        for _ in 2..=m {
            t2 = two * x * t1 - t0;
            t0 = t1;
            t1 = t2;
        }
        t1
    }
}

/// T_i evaluated at every point of `xs`.
pub fn evaluate_chebyshev_polynomial<T: Float>(xs: &[T], i: usize) -> Vec<T> {
    xs.iter().map(|&x| chebyshev_t(i, x)).collect()
}

/// The n + 1 Chebyshev nodes x_k = cos(π(k + ½)/(n + 1)), k = 0..n.
pub fn chebyshev_nodes(n: usize) -> Vec<f64> {
    (0..=n)
        .map(|k| (PI * (k as f64 + 0.5) / (n as f64 + 1.0)).cos())
        .collect()
}

/// i-th coefficient of the degree-n expansion f(x) ≈ Σⱼ cⱼ Tⱼ(x) on [-1, 1].
///
/// c₀ = (1/(n+1)) Σₖ f(xₖ) and cᵢ = (2/(n+1)) Σₖ f(xₖ) Tᵢ(xₖ) for i ≥ 1.
pub fn chebyshev_coefficient<F: Fn(f64) -> f64>(f: F, n: usize, i: usize) -> f64 {
    coefficient_from_nodes(&f, &chebyshev_nodes(n), i)
}

fn coefficient_from_nodes<F: Fn(f64) -> f64>(f: &F, nodes: &[f64], i: usize) -> f64 {
    let count = nodes.len() as f64;
    let weight = if i == 0 { 1.0 / count } else { 2.0 / count };
    weight * nodes.iter().map(|&x| f(x) * chebyshev_t(i, x)).sum::<f64>()
}

/// Coefficients c₀..c_N of a discrete Chebyshev expansion.
#[derive(Debug, Clone, PartialEq)]
pub struct ChebyshevExpansion {
    coeffs: Vec<f64>,
}

impl ChebyshevExpansion {
    /// Expand `f` to degree `order` using `order + 1` Chebyshev nodes.
    pub fn new<F: Fn(f64) -> f64>(f: F, order: usize) -> Self {
        let nodes = chebyshev_nodes(order);
        let coeffs = (0..=order).map(|i| coefficient_from_nodes(&f, &nodes, i)).collect();
        Self { coeffs }
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coeffs
    }

    pub fn order(&self) -> usize {
        self.coeffs.len() - 1
    }

    /// Σⱼ cⱼ Tⱼ(x) by Clenshaw's recurrence.
    pub fn evaluate(&self, x: f64) -> f64 {
        let mut b1 = 0.0;
        let mut b2 = 0.0;
        for &c in self.coeffs[1..].iter().rev() {
            let b0 = c + 2.0 * x * b1 - b2;
            b2 = b1;
            b1 = b0;
        }
        self.coeffs[0] + x * b1 - b2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn low_degrees() {
        let xs = [-1.0, -0.3, 0.0, 0.25, 0.9];
        assert_eq!(evaluate_chebyshev_polynomial(&xs, 0), vec![1.0; 5]);
        assert_eq!(evaluate_chebyshev_polynomial(&xs, 1), xs.to_vec());
    }

    #[test]
    fn cosine_identity() {
        for &theta in &[0.0, 0.1, 0.7, 1.3, 2.2, 3.0] {
            let x: f64 = f64::cos(theta);
            for i in 0..12 {
                assert_abs_diff_eq!(chebyshev_t(i, x), (i as f64 * theta).cos(), epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn coefficients_of_a_chebyshev_polynomial_are_a_unit_vector() {
        let n = 6;
        for i in 0..=n {
            let c = chebyshev_coefficient(|x| chebyshev_t(3, x), n, i);
            let expected = if i == 3 { 1.0 } else { 0.0 };
            assert_abs_diff_eq!(c, expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn expansion_approximates_smooth_functions() {
        let exp = ChebyshevExpansion::new(f64::exp, 15);
        assert_eq!(exp.order(), 15);
        for &x in &[-0.95, -0.4, 0.0, 0.33, 0.99] {
            assert_abs_diff_eq!(exp.evaluate(x), x.exp(), epsilon = 1e-12);
        }
    }

    #[test]
    fn clenshaw_matches_direct_sum() {
        let exp = ChebyshevExpansion::new(|x| (1.5 - x).ln(), 10);
        let x = 0.37;
        let direct: f64 = exp
            .coefficients()
            .iter()
            .enumerate()
            .map(|(i, c)| c * chebyshev_t(i, x))
            .sum();
        assert_abs_diff_eq!(exp.evaluate(x), direct, epsilon = 1e-13);
    }
}
