//! Log-determinant estimator selection, mirroring [`TraceContext`](super::TraceContext).

use crate::config::{ChebyshevOptions, EpsilonDelta};
use crate::core::traits::LinearOperator;
use crate::error::KError;
use crate::logdet::{LogdetEstimate, logdet_stochastic_chebyshev, logdet_stochastic_chebyshev_epsilon_delta};
use crate::utils::spectrum::SpectralBounds;
use rand::Rng;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogdetKind {
    /// Fixed sample size and polynomial order
    StochasticChebyshev,
    /// Sample size and order derived from (ε,ζ) and the condition number
    StochasticChebyshevEpsilonDelta,
}

impl FromStr for LogdetKind {
    type Err = KError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "stochastic_chebyshev" | "chebyshev" => Ok(LogdetKind::StochasticChebyshev),
            "stochastic_chebyshev_epsilon_delta" | "chebyshev_epsilon_delta" => {
                Ok(LogdetKind::StochasticChebyshevEpsilonDelta)
            }
            other => Err(KError::invalid(format!("unknown log-determinant estimator '{other}'"))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogdetContext {
    pub kind: LogdetKind,
    pub chebyshev: ChebyshevOptions,
    /// Target of the (ε,ζ) variant; `delta` holds ζ
    pub target: EpsilonDelta,
    /// Known spectral interval; estimated by Lanczos when `None`
    pub bounds: Option<SpectralBounds>,
    pub sample_size_override: Option<usize>,
}

impl LogdetContext {
    pub fn new(kind: LogdetKind) -> Self {
        Self {
            kind,
            chebyshev: ChebyshevOptions::default(),
            target: EpsilonDelta::logdet_default(),
            bounds: None,
            sample_size_override: None,
        }
    }

    pub fn from_name(name: &str) -> Result<Self, KError> {
        Ok(Self::new(name.parse()?))
    }

    pub fn with_bounds(mut self, lambda_min: f64, lambda_max: f64) -> Self {
        self.bounds = Some(SpectralBounds::new(lambda_min, lambda_max));
        self
    }

    /// Estimate logdet(C) for symmetric positive definite C.
    pub fn estimate<O, R>(&self, c: &mut O, rng: &mut R) -> Result<LogdetEstimate, KError>
    where
        O: LinearOperator + ?Sized,
        R: Rng + ?Sized,
    {
        match self.kind {
            LogdetKind::StochasticChebyshev => {
                let value = logdet_stochastic_chebyshev(c, self.bounds, &self.chebyshev, rng)?;
                Ok(LogdetEstimate {
                    value,
                    sample_size: self.chebyshev.sample_size,
                    order: self.chebyshev.order,
                })
            }
            LogdetKind::StochasticChebyshevEpsilonDelta => {
                logdet_stochastic_chebyshev_epsilon_delta(c, self.target, self.bounds, self.sample_size_override, rng)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use faer::Mat;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn parses_names() {
        assert_eq!("chebyshev".parse::<LogdetKind>().unwrap(), LogdetKind::StochasticChebyshev);
        assert!(LogdetContext::from_name("slq").is_err());
    }

    #[test]
    fn estimates_with_stored_options() {
        let d = [1.0, 2.0, 4.0, 8.0];
        let mut c = Mat::from_fn(4, 4, |i, j| if i == j { d[i] } else { 0.0 });
        let mut rng = StdRng::seed_from_u64(6);
        let mut ctx = LogdetContext::new(LogdetKind::StochasticChebyshev).with_bounds(1.0, 8.0);
        ctx.chebyshev = ChebyshevOptions { sample_size: 2, order: 30 };
        let est = ctx.estimate(&mut c, &mut rng).unwrap();
        assert_eq!(est.order, 30);
        assert_abs_diff_eq!(est.value, 64f64.ln(), epsilon = 1e-8);
    }
}
