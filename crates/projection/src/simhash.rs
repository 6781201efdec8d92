//! Random-hyperplane SimHash over feature matrices.
//!
//! `fit` draws `n_bits` random unit vectors in the feature space. `transform`
//! sets bit `i` of a row's hash when the row lies strictly on the positive
//! side of hyperplane `i`. Two vectors at angle `θ` agree on a given bit with
//! probability `1 - θ/π`, so Hamming distance between hashes estimates
//! angular distance between rows.

use std::time::Instant;

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use rayon::prelude::*;
use tracing::debug;

use crate::config::{ProjectionConfig, ProjectionError};
use crate::matrix::FeatureMatrix;

/// Sign-of-projection hasher with a fitted hyperplane basis.
///
/// `fit` takes `&mut self` and replaces the basis wholesale, while
/// `transform` only reads it, so a fitted hasher can be shared across
/// threads for hashing.
#[derive(Debug, Clone)]
pub struct ProjectionSimHash {
    config: ProjectionConfig,
    /// Shape `(dimension, n_bits)`, each column of unit length.
    basis: Option<Array2<f64>>,
}

impl ProjectionSimHash {
    /// Create an unfitted hasher emitting `n_bits`-bit hashes.
    pub fn new(n_bits: u32) -> Result<Self, ProjectionError> {
        Self::from_config(ProjectionConfig::new().with_n_bits(n_bits))
    }

    pub fn from_config(config: ProjectionConfig) -> Result<Self, ProjectionError> {
        config.validate()?;
        Ok(Self {
            config,
            basis: None,
        })
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    pub fn n_bits(&self) -> u32 {
        self.config.n_bits
    }

    pub fn is_fitted(&self) -> bool {
        self.basis.is_some()
    }

    /// The fitted hyperplanes, one unit column per output bit.
    pub fn basis(&self) -> Option<&Array2<f64>> {
        self.basis.as_ref()
    }

    /// Feature dimension the basis was fitted to.
    pub fn dimension(&self) -> Option<usize> {
        self.basis.as_ref().map(|b| b.nrows())
    }

    /// Draw a fresh basis for the column dimension of `x`.
    ///
    /// Uses `config.seed` when set, OS entropy otherwise. Only the shape of
    /// `x` is read.
    pub fn fit<X>(&mut self, x: &X) -> Result<&mut Self, ProjectionError>
    where
        X: FeatureMatrix + ?Sized,
    {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.fit_with_rng(x, &mut rng)
    }

    /// Draw a fresh basis from the given random source.
    pub fn fit_with_rng<X, R>(&mut self, x: &X, rng: &mut R) -> Result<&mut Self, ProjectionError>
    where
        X: FeatureMatrix + ?Sized,
        R: Rng + ?Sized,
    {
        let (rows, dimension) = x.shape();
        if dimension == 0 {
            return Err(ProjectionError::EmptyDimension);
        }
        let n_bits = self.config.n_bits as usize;

        let mut basis = Array2::from_shape_fn((dimension, n_bits), |_| {
            rng.sample::<f64, _>(StandardNormal)
        });
        for mut column in basis.columns_mut() {
            let norm = column.dot(&column).sqrt();
            if norm > 0.0 {
                column.mapv_inplace(|v| v / norm);
            }
        }

        debug!(rows, dimension, n_bits, "projection_fit");
        self.basis = Some(basis);
        Ok(self)
    }

    /// Hash every row of `x` to an integer below `2^n_bits`.
    pub fn transform_int<X>(&self, x: &X) -> Result<Vec<u128>, ProjectionError>
    where
        X: FeatureMatrix + Sync + ?Sized,
    {
        let basis = self.basis.as_ref().ok_or(ProjectionError::NotFitted)?;
        let (rows, dimension) = x.shape();
        if dimension != basis.nrows() {
            return Err(ProjectionError::DimensionMismatch {
                expected: basis.nrows(),
                got: dimension,
            });
        }

        let start = Instant::now();
        let hashes = if self.config.use_parallel {
            (0..rows)
                .into_par_iter()
                .map(|row| hash_row(x, row, basis))
                .collect()
        } else {
            (0..rows).map(|row| hash_row(x, row, basis)).collect()
        };
        debug!(
            rows,
            elapsed_micros = start.elapsed().as_micros() as u64,
            "projection_transform"
        );
        Ok(hashes)
    }

    /// Hash every row of `x` to a `0x`-prefixed hex string.
    pub fn transform<X>(&self, x: &X) -> Result<Vec<String>, ProjectionError>
    where
        X: FeatureMatrix + Sync + ?Sized,
    {
        Ok(self
            .transform_int(x)?
            .into_iter()
            .map(|h| format!("{h:#x}"))
            .collect())
    }

    pub fn fit_transform<X>(&mut self, x: &X) -> Result<Vec<String>, ProjectionError>
    where
        X: FeatureMatrix + Sync + ?Sized,
    {
        self.fit(x)?;
        self.transform(x)
    }
}

fn hash_row<X>(x: &X, row: usize, basis: &Array2<f64>) -> u128
where
    X: FeatureMatrix + ?Sized,
{
    x.project_row(row, basis)
        .iter()
        .enumerate()
        .filter(|&(_, &y)| y > 0.0)
        .fold(0u128, |acc, (bit, _)| acc | (1u128 << bit))
}
