//! Configuration and error types for text SimHash cohorting.
//!
//! This module defines the public configuration surface for the text hashers.
//! It performs no I/O, so a hash is a pure function of
//! `(tokens, config)`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::digest::DIGEST_BITS;

/// Configuration for [`SimHash`](crate::SimHash) and
/// [`TruncatedSimHash`](crate::TruncatedSimHash).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TextSimHashConfig {
    /// Precision of the full SimHash, at most 128 bits (the MD5 width).
    pub n_bits: u32,
    /// When set, only the most-significant `bits_to_keep` bits of the
    /// `n_bits` hash are returned.
    ///
    /// Smaller values give coarser cohorts that stay consistent with the
    /// finer-grained hash.
    pub bits_to_keep: Option<u32>,
    /// Hash batches of documents on the rayon pool.
    pub use_parallel: bool,
}

impl TextSimHashConfig {
    /// Create a new configuration with sensible defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the SimHash precision.
    pub fn with_n_bits(mut self, n_bits: u32) -> Self {
        self.n_bits = n_bits;
        self
    }

    /// Keep only the top `bits_to_keep` bits of each hash.
    pub fn with_bits_to_keep(mut self, bits_to_keep: u32) -> Self {
        self.bits_to_keep = Some(bits_to_keep);
        self
    }

    /// Enable or disable parallel batch hashing.
    pub fn with_parallel(mut self, use_parallel: bool) -> Self {
        self.use_parallel = use_parallel;
        self
    }

    /// Number of bits in the values this configuration produces.
    pub fn output_bits(&self) -> u32 {
        self.bits_to_keep.unwrap_or(self.n_bits)
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), TextSimHashError> {
        if self.n_bits > DIGEST_BITS {
            return Err(TextSimHashError::TooManyBits {
                n_bits: self.n_bits,
            });
        }
        if let Some(bits_to_keep) = self.bits_to_keep {
            if bits_to_keep > self.n_bits {
                return Err(TextSimHashError::KeepExceedsSimhash {
                    bits_to_keep,
                    simhash_bits: self.n_bits,
                });
            }
        }
        Ok(())
    }
}

impl Default for TextSimHashConfig {
    fn default() -> Self {
        Self {
            n_bits: 64,
            bits_to_keep: None,
            use_parallel: false,
        }
    }
}

/// Errors returned by the text hashers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TextSimHashError {
    #[error("invalid config: only hashes up to 128 bits are supported (got n_bits={n_bits})")]
    TooManyBits { n_bits: u32 },

    #[error(
        "invalid config: cannot keep more bits than the simhash provides \
         (bits_to_keep={bits_to_keep}, simhash_bits={simhash_bits})"
    )]
    KeepExceedsSimhash { bits_to_keep: u32, simhash_bits: u32 },

    #[error("bit consensus requires at least one value")]
    EmptyInput,

    #[error("tokenizer produced no tokens for document")]
    NoTokens,
}

impl TextSimHashError {
    /// Returns true for errors raised while constructing a hasher.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            TextSimHashError::TooManyBits { .. } | TextSimHashError::KeepExceedsSimhash { .. }
        )
    }
}
