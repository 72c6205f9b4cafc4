use criterion::{Criterion, black_box, criterion_group, criterion_main};
use faer::Mat;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracelogdet::config::{ChebyshevOptions, HutchPlusPlusOptions, HutchinsonOptions};
use tracelogdet::logdet::logdet_stochastic_chebyshev;
use tracelogdet::trace::{hutch_plus_plus_trace, hutchinson_trace};
use tracelogdet::utils::spectrum::SpectralBounds;

fn bench_trace_estimators(c: &mut Criterion) {
    let n = 200;
    let mut a = Mat::from_fn(n, n, |i, j| 0.5f64.powi((i as i32 - j as i32).abs()));
    let mut rng = StdRng::seed_from_u64(0);

    c.bench_function("hutchinson 99 probes", |ben| {
        let opts = HutchinsonOptions { sample_size: 99, ..Default::default() };
        ben.iter(|| hutchinson_trace(black_box(&mut a), &opts, &mut rng).unwrap())
    });

    c.bench_function("hutch++ 99 probes", |ben| {
        let opts = HutchPlusPlusOptions::default();
        ben.iter(|| hutch_plus_plus_trace(black_box(&mut a), &opts, &mut rng).unwrap())
    });

    c.bench_function("stochastic chebyshev logdet", |ben| {
        let opts = ChebyshevOptions::default();
        let bounds = Some(SpectralBounds::new(1.0 / 3.0, 3.0));
        ben.iter(|| logdet_stochastic_chebyshev(black_box(&mut a), bounds, &opts, &mut rng).unwrap())
    });
}

criterion_group!(benches, bench_trace_estimators);
criterion_main!(benches);
