//! # Projection SimHash
//!
//! Random-hyperplane locality-sensitive hashing for numeric feature vectors.
//! A hasher is fitted once to the feature dimension of a dataset and then
//! maps every row of a matrix to an `n_bits` sign pattern, rendered as
//! `0x`-prefixed hex.
//!
//! Dense `ndarray` matrices and [`CsrMatrix`] sparse matrices are accepted
//! interchangeably through [`FeatureMatrix`] and hash identically.
//!
//! ```
//! use ndarray::array;
//! use projection::{ProjectionConfig, ProjectionSimHash};
//!
//! let x = array![[1.0, 0.0, 2.0], [0.0, 1.0, 1.0]];
//! let mut hasher =
//!     ProjectionSimHash::from_config(ProjectionConfig::new().with_n_bits(8).with_seed(7)).unwrap();
//!
//! let cohorts = hasher.fit_transform(&x).unwrap();
//! assert!(cohorts.iter().all(|h| h.starts_with("0x")));
//! ```

pub mod config;
pub mod matrix;
mod simhash;

pub use crate::config::{MAX_PROJECTION_BITS, ProjectionConfig, ProjectionError};
pub use crate::matrix::{CsrMatrix, FeatureMatrix};
pub use crate::simhash::ProjectionSimHash;
