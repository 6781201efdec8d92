//! Token-majority SimHash over text documents.
//!
//! A document is tokenized, every token is clipped to an `n_bits` MD5
//! prefix, and the clipped values are combined by a per-bit majority vote.
//! Documents sharing most of their tokens therefore share most of their bits.

use rayon::prelude::*;

use crate::config::{TextSimHashConfig, TextSimHashError};
use crate::consensus::bit_consensus;
use crate::digest::{DIGEST_BITS, clip_digest};
use crate::tokenize::{SpaceTokenizer, Tokenizer};

/// SimHash of `n_bits` bits (at most 128) over the tokens of a document.
#[derive(Debug, Clone)]
pub struct SimHash<T = SpaceTokenizer> {
    n_bits: u32,
    use_parallel: bool,
    tokenizer: T,
}

impl SimHash<SpaceTokenizer> {
    /// Create a hasher that splits documents on the space character.
    pub fn new(n_bits: u32) -> Result<Self, TextSimHashError> {
        Self::with_tokenizer(n_bits, SpaceTokenizer)
    }
}

impl<T: Tokenizer> SimHash<T> {
    /// Create a hasher with a custom tokenizer.
    ///
    /// Fails with [`TextSimHashError::TooManyBits`] when `n_bits > 128`.
    pub fn with_tokenizer(n_bits: u32, tokenizer: T) -> Result<Self, TextSimHashError> {
        if n_bits > DIGEST_BITS {
            return Err(TextSimHashError::TooManyBits { n_bits });
        }
        Ok(Self {
            n_bits,
            use_parallel: false,
            tokenizer,
        })
    }

    /// Create a hasher from `cfg`, ignoring `cfg.bits_to_keep`.
    ///
    /// Use [`TruncatedSimHash::from_config`](crate::TruncatedSimHash::from_config)
    /// to honour truncation.
    pub fn from_config(cfg: &TextSimHashConfig, tokenizer: T) -> Result<Self, TextSimHashError> {
        let mut hasher = Self::with_tokenizer(cfg.n_bits, tokenizer)?;
        hasher.use_parallel = cfg.use_parallel;
        Ok(hasher)
    }

    /// Hash batches on the rayon pool.
    pub fn with_parallel(mut self, use_parallel: bool) -> Self {
        self.use_parallel = use_parallel;
        self
    }

    pub fn n_bits(&self) -> u32 {
        self.n_bits
    }

    pub fn tokenizer(&self) -> &T {
        &self.tokenizer
    }

    /// Compute the hash of `document` as an integer below `2^n_bits`.
    ///
    /// Fails with [`TextSimHashError::NoTokens`] when the tokenizer yields
    /// nothing.
    pub fn hash_int(&self, document: &str) -> Result<u128, TextSimHashError> {
        let tokens = self.tokenizer.tokenize(document);
        if tokens.is_empty() {
            return Err(TextSimHashError::NoTokens);
        }

        let clipped: Vec<u128> = tokens
            .iter()
            .map(|t| clip_digest(t.as_bytes(), self.n_bits))
            .collect();

        bit_consensus(&clipped, self.n_bits)
    }

    /// Compute the hash of `document` as lowercase hex without padding.
    pub fn hash_hex(&self, document: &str) -> Result<String, TextSimHashError> {
        self.hash_int(document).map(|h| format!("{h:x}"))
    }

    /// Hash every document, in input order.
    ///
    /// The parallel path returns the same values as the sequential one.
    pub fn hash_batch<S>(&self, documents: &[S]) -> Result<Vec<u128>, TextSimHashError>
    where
        S: AsRef<str> + Sync,
    {
        if self.use_parallel {
            documents
                .par_iter()
                .map(|d| self.hash_int(d.as_ref()))
                .collect()
        } else {
            documents.iter().map(|d| self.hash_int(d.as_ref())).collect()
        }
    }
}
