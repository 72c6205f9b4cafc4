//! Name-based estimator selection.

pub mod logdet_context;
pub mod trace_context;

pub use logdet_context::{LogdetContext, LogdetKind};
pub use trace_context::{TraceContext, TraceKind};
