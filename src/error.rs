use thiserror::Error;

// Unified error type for tracelogdet

#[derive(Error, Debug)]
pub enum KError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("CG failed to converge after {iterations} iterations (relative residual: {residual:.2e})")]
    ConvergenceFailure { iterations: usize, residual: f64 },
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
    #[error("indefinite matrix detected (d^T A d <= 0)")]
    IndefiniteMatrix,
    #[error("factorization error: {0}")]
    FactorError(String),
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),
}

impl KError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        KError::InvalidArgument(msg.into())
    }
}

/// Fails with [`KError::DimensionMismatch`] unless `got == expected`.
pub(crate) fn check_dim(expected: usize, got: usize) -> Result<(), KError> {
    if expected == got {
        Ok(())
    } else {
        Err(KError::DimensionMismatch { expected, got })
    }
}
