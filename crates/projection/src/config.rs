//! Configuration and error types for random-projection SimHash.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Widest hash a projection hasher can emit (values are held in `u128`).
pub const MAX_PROJECTION_BITS: u32 = 128;

/// Configuration for [`ProjectionSimHash`](crate::ProjectionSimHash).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectionConfig {
    /// Number of hyperplanes, i.e. output bits. Must be in `1..=128`.
    pub n_bits: u32,
    /// Seed for the hyperplane draw.
    ///
    /// Two hashers fitted with the same seed on data of the same dimension
    /// share a basis. `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Hash rows on the rayon pool.
    pub use_parallel: bool,
}

impl ProjectionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_n_bits(mut self, n_bits: u32) -> Self {
        self.n_bits = n_bits;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_parallel(mut self, use_parallel: bool) -> Self {
        self.use_parallel = use_parallel;
        self
    }

    pub fn validate(&self) -> Result<(), ProjectionError> {
        if self.n_bits == 0 || self.n_bits > MAX_PROJECTION_BITS {
            return Err(ProjectionError::InvalidBits {
                n_bits: self.n_bits,
            });
        }
        Ok(())
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            n_bits: 16,
            seed: None,
            use_parallel: false,
        }
    }
}

/// Errors returned by the projection hasher and sparse matrix constructors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProjectionError {
    #[error("invalid config: n_bits must be in 1..=128 (got {n_bits})")]
    InvalidBits { n_bits: u32 },

    #[error("the fit method has not been called")]
    NotFitted,

    #[error("cannot fit hyperplanes to zero-dimensional features")]
    EmptyDimension,

    #[error("dimension mismatch: fitted on {expected} columns, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("invalid sparse matrix: {0}")]
    InvalidSparse(String),
}
