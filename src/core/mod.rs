//! Core linear-algebra traits and their implementations for faer types and closures.

pub mod traits;
pub mod wrappers;

pub use traits::{Indexing, InnerProduct, LinearOperator, MatVec};
