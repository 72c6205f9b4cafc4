//! Trace estimator selection.
//!
//! `TraceContext` holds an estimator kind together with the options of every
//! estimator, so callers can pick a method by name (e.g. from a config file or a
//! command-line flag) and run it through a single [`TraceContext::estimate`].

use crate::config::{EpsilonDelta, HutchPlusPlusOptions, HutchinsonOptions};
use crate::core::traits::LinearOperator;
use crate::error::KError;
use crate::trace::{
    TraceEstimate, explicit_trace, hutch_plus_plus_epsilon_delta_trace, hutch_plus_plus_trace,
    hutchinson_epsilon_delta_trace, hutchinson_trace,
};
use rand::Rng;
use std::str::FromStr;

/// Available trace estimators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceKind {
    /// Hutchinson with a fixed sample size
    Hutchinson,
    /// Hutchinson with the sample size derived from (ε,δ)
    HutchinsonEpsilonDelta,
    /// Hutch++ with a fixed matrix-vector budget
    HutchPlusPlus,
    /// Hutch++ with the budget derived from (ε,δ)
    HutchPlusPlusEpsilonDelta,
    /// n basis-vector applications
    Explicit,
}

impl FromStr for TraceKind {
    type Err = KError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hutchinson" => Ok(TraceKind::Hutchinson),
            "hutchinson_epsilon_delta" => Ok(TraceKind::HutchinsonEpsilonDelta),
            "hutch++" | "hutch_plus_plus" => Ok(TraceKind::HutchPlusPlus),
            "hutch++_epsilon_delta" | "hutch_plus_plus_epsilon_delta" => Ok(TraceKind::HutchPlusPlusEpsilonDelta),
            "explicit" => Ok(TraceKind::Explicit),
            other => Err(KError::invalid(format!("unknown trace estimator '{other}'"))),
        }
    }
}

/// Estimator kind plus the settings each estimator reads.
#[derive(Debug, Clone)]
pub struct TraceContext {
    pub kind: TraceKind,
    pub hutchinson: HutchinsonOptions,
    pub hutch_plus_plus: HutchPlusPlusOptions,
    /// Target of the (ε,δ) variants
    pub target: EpsilonDelta,
    /// Replaces the derived (ε,δ) sample size, forfeiting the guarantee
    pub sample_size_override: Option<usize>,
}

impl TraceContext {
    pub fn new(kind: TraceKind) -> Self {
        Self {
            kind,
            hutchinson: HutchinsonOptions::default(),
            hutch_plus_plus: HutchPlusPlusOptions::default(),
            target: EpsilonDelta::trace_default(),
            sample_size_override: None,
        }
    }

    pub fn from_name(name: &str) -> Result<Self, KError> {
        Ok(Self::new(name.parse()?))
    }

    /// Estimate tr(A) with the configured estimator. `sample_size` in the result
    /// is the number of probes requested (n for [`TraceKind::Explicit`]).
    pub fn estimate<O, R>(&self, a: &mut O, rng: &mut R) -> Result<TraceEstimate, KError>
    where
        O: LinearOperator + ?Sized,
        R: Rng + ?Sized,
    {
        match self.kind {
            TraceKind::Hutchinson => {
                let value = hutchinson_trace(a, &self.hutchinson, rng)?;
                Ok(TraceEstimate { value, sample_size: self.hutchinson.sample_size })
            }
            TraceKind::HutchinsonEpsilonDelta => hutchinson_epsilon_delta_trace(
                a,
                self.target,
                self.hutchinson.distribution,
                self.hutchinson.block_size,
                self.sample_size_override,
                rng,
            ),
            TraceKind::HutchPlusPlus => {
                let value = hutch_plus_plus_trace(a, &self.hutch_plus_plus, rng)?;
                Ok(TraceEstimate { value, sample_size: self.hutch_plus_plus.sample_size })
            }
            TraceKind::HutchPlusPlusEpsilonDelta => hutch_plus_plus_epsilon_delta_trace(
                a,
                self.target,
                self.hutch_plus_plus.distribution,
                self.sample_size_override,
                rng,
            ),
            TraceKind::Explicit => {
                let value = explicit_trace(a)?;
                Ok(TraceEstimate { value, sample_size: a.dim() })
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
        assert_eq!("Hutchinson".parse::<TraceKind>().unwrap(), TraceKind::Hutchinson);
        assert_eq!("hutch++".parse::<TraceKind>().unwrap(), TraceKind::HutchPlusPlus);
        assert_eq!(
            "hutch_plus_plus_epsilon_delta".parse::<TraceKind>().unwrap(),
            TraceKind::HutchPlusPlusEpsilonDelta
        );
        assert!(matches!("lanczos".parse::<TraceKind>(), Err(KError::InvalidArgument(_))));
    }

    #[test]
    fn every_kind_is_exact_on_a_diagonal_matrix() {
        let d = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let mut a = Mat::from_fn(6, 6, |i, j| if i == j { d[i] } else { 0.0 });
        let mut rng = StdRng::seed_from_u64(21);
        for kind in [
            TraceKind::Hutchinson,
            TraceKind::HutchinsonEpsilonDelta,
            TraceKind::HutchPlusPlus,
            TraceKind::HutchPlusPlusEpsilonDelta,
            TraceKind::Explicit,
        ] {
            let mut ctx = TraceContext::new(kind);
            ctx.sample_size_override = Some(24);
            let est = ctx.estimate(&mut a, &mut rng).unwrap();
            assert_abs_diff_eq!(est.value, 21.0, epsilon = 1e-9);
        }
    }
}
