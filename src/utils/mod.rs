//! Shared utilities: convergence tracking, random probes and spectral bounds.

pub mod convergence;
pub mod sampling;
pub mod spectrum;

pub use convergence::{Convergence, SolveStats};
pub use sampling::{ProbeDistribution, probe_block, probe_vector};
pub use spectrum::{Lanczos, SpectralBounds};
