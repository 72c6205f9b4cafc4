//! Statistical behaviour of the trace estimators, with seeded generators.

use faer::Mat;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, StandardNormal};
use tracelogdet::config::{EpsilonDelta, HutchPlusPlusOptions, HutchinsonOptions};
use tracelogdet::operator::{ApproxInverse, FnOperator};
use tracelogdet::trace::{
    explicit_trace, hutch_plus_plus_epsilon_delta_trace, hutch_plus_plus_trace, hutchinson_epsilon_delta_trace,
    hutchinson_trace,
};
use tracelogdet::utils::sampling::ProbeDistribution;

/// Kac-Murdock-Szegő matrix, A[i,j] = ρ^|i−j|, SPD for |ρ| < 1.
fn kms(n: usize, rho: f64) -> Mat<f64> {
    Mat::from_fn(n, n, |i, j| rho.powi((i as i32 - j as i32).abs()))
}

fn variance(xs: &[f64]) -> f64 {
    let mean = xs.iter().sum::<f64>() / xs.len() as f64;
    xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (xs.len() - 1) as f64
}

#[test]
fn hutchinson_within_five_percent_on_spd() {
    let mut a = kms(50, 0.5);
    let mut rng = StdRng::seed_from_u64(2024);
    let opts = HutchinsonOptions { sample_size: 1000, ..Default::default() };
    let est = hutchinson_trace(&mut a, &opts, &mut rng).unwrap();
    assert!((est - 50.0).abs() < 0.05 * 50.0, "estimate {est}");
}

#[test]
fn hutchinson_of_the_inverse_matches_the_explicit_trace() {
    let n = 20;
    let a = kms(n, 0.5);
    let mut inv = ApproxInverse::new(&a, 1e-10, 200, true);
    let exact = explicit_trace(&mut inv).unwrap();
    // tr(A⁻¹) for KMS: interior diagonal (1+ρ²)/(1−ρ²), two corners 1/(1−ρ²)
    let expected = (n - 2) as f64 * 1.25 / 0.75 + 2.0 / 0.75;
    assert!((exact - expected).abs() < 1e-6);

    let mut rng = StdRng::seed_from_u64(7);
    let opts = HutchinsonOptions { sample_size: 400, ..Default::default() };
    let est = hutchinson_trace(&mut inv, &opts, &mut rng).unwrap();
    assert!((est - expected).abs() < 0.05 * expected, "estimate {est}, expected {expected}");
}

#[test]
fn epsilon_delta_failure_rate_is_below_delta() {
    // strongly correlated KMS: a few dominant eigenvalues, as Hutch++ assumes
    let n = 40;
    let mut a = kms(n, 0.95);
    let exact = n as f64;
    let target = EpsilonDelta::new(0.1, 0.1);
    let reps = 200;
    let mut rng = StdRng::seed_from_u64(99);

    let mut hutch_failures = 0;
    let mut pp_failures = 0;
    for _ in 0..reps {
        let h = hutchinson_epsilon_delta_trace(&mut a, target, ProbeDistribution::Rademacher, 20, None, &mut rng)
            .unwrap();
        if (h.value - exact).abs() >= target.epsilon * exact {
            hutch_failures += 1;
        }
        let p = hutch_plus_plus_epsilon_delta_trace(&mut a, target, ProbeDistribution::Rademacher, None, &mut rng)
            .unwrap();
        assert_eq!(p.sample_size, 18);
        if (p.value - exact).abs() >= target.epsilon * exact {
            pp_failures += 1;
        }
    }
    let allowed = (target.delta * reps as f64) as usize;
    assert!(hutch_failures <= allowed, "hutchinson failed {hutch_failures} of {reps}");
    assert!(pp_failures <= allowed, "hutch++ failed {pp_failures} of {reps}");
}

#[test]
fn hutch_plus_plus_beats_hutchinson_on_low_rank_plus_noise() {
    let n = 100;
    let rank = 5;
    let mut rng = StdRng::seed_from_u64(5);
    let u: Vec<Vec<f64>> = (0..rank)
        .map(|_| (0..n).map(|_| StandardNormal.sample(&mut rng)).collect())
        .collect();
    let weights = [100.0, 50.0, 25.0, 10.0, 5.0];
    let a = Mat::from_fn(n, n, |i, j| {
        let low: f64 = (0..rank).map(|r| weights[r] * u[r][i] * u[r][j]).sum();
        low + if i == j { 0.01 } else { 0.0 }
    });
    let exact: f64 = (0..n).map(|i| a[(i, i)]).sum();

    let budget = 30;
    let reps = 40;
    let mut h_values = Vec::with_capacity(reps);
    let mut pp_values = Vec::with_capacity(reps);
    for _ in 0..reps {
        let mut op = a.clone();
        let h_opts = HutchinsonOptions { sample_size: budget, ..Default::default() };
        h_values.push(hutchinson_trace(&mut op, &h_opts, &mut rng).unwrap());
        let pp_opts = HutchPlusPlusOptions { sample_size: budget, ..Default::default() };
        pp_values.push(hutch_plus_plus_trace(&mut op, &pp_opts, &mut rng).unwrap());
    }
    let var_h = variance(&h_values);
    let var_pp = variance(&pp_values);
    assert!(var_pp < 0.01 * var_h, "hutch++ variance {var_pp} vs hutchinson {var_h}");
    let mean_pp = pp_values.iter().sum::<f64>() / reps as f64;
    assert!((mean_pp - exact).abs() < 1e-3 * exact);
}

#[test]
fn closure_operators_work_matrix_free() {
    // A = diag(1..=n) applied without storing a matrix
    let n = 40;
    let mut op = FnOperator::new(n, |x: &[f64], y: &mut [f64]| {
        for (i, (yi, xi)) in y.iter_mut().zip(x).enumerate() {
            *yi = (i + 1) as f64 * xi;
        }
    });
    let mut rng = StdRng::seed_from_u64(1);
    let est = hutchinson_trace(&mut op, &HutchinsonOptions::default(), &mut rng).unwrap();
    assert!((est - 820.0).abs() < 1e-9);
}
