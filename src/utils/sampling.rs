//! Random probe vectors for the stochastic estimators.
//!
//! All randomness flows through a caller-supplied [`rand::Rng`]; seeding it
//! (e.g. `StdRng::seed_from_u64`) makes every estimator reproducible.

use crate::error::KError;
use faer::Mat;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use std::fmt;
use std::str::FromStr;

/// Entry distribution of a probe vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProbeDistribution {
    /// Independent ±1 entries with equal probability.
    #[default]
    Rademacher,
    /// Independent standard normal entries.
    Gaussian,
}

impl ProbeDistribution {
    /// Draw a single entry.
    pub fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> f64 {
        match self {
            ProbeDistribution::Rademacher => {
                if rng.gen_bool(0.5) {
                    1.0
                } else {
                    -1.0
                }
            }
            ProbeDistribution::Gaussian => StandardNormal.sample(rng),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ProbeDistribution::Rademacher => "rademacher",
            ProbeDistribution::Gaussian => "standard_gaussian",
        }
    }
}

impl fmt::Display for ProbeDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProbeDistribution {
    type Err = KError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rademacher" => Ok(ProbeDistribution::Rademacher),
            "gaussian" | "standard_gaussian" | "normal" => Ok(ProbeDistribution::Gaussian),
            other => Err(KError::invalid(format!(
                "distribution must be one of [\"standard_gaussian\", \"rademacher\"], got {other:?}"
            ))),
        }
    }
}

/// Draw one probe vector of length `n`.
pub fn probe_vector<R: Rng + ?Sized>(dist: ProbeDistribution, n: usize, rng: &mut R) -> Vec<f64> {
    (0..n).map(|_| dist.sample(rng)).collect()
}

/// Draw an `n × k` block of independent probe vectors, filled column by column.
pub fn probe_block<R: Rng + ?Sized>(
    dist: ProbeDistribution,
    n: usize,
    k: usize,
    rng: &mut R,
) -> Mat<f64> {
    let mut w = Mat::<f64>::zeros(n, k);
    for j in 0..k {
        for i in 0..n {
            w[(i, j)] = dist.sample(rng);
        }
    }
    w
}
