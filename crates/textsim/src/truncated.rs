//! Truncated ("sorting") SimHash for coarse cohorts.
//!
//! A full `simhash_bits` SimHash is computed and only its top
//! `bits_to_keep` bits are returned, so for every document
//!
//! ```text
//! truncated(k, n).hash_int(doc) == simhash(n).hash_int(doc) >> (n - k)
//! ```
//!
//! Fewer kept bits mean larger buckets that are still consistent with the
//! finer-grained hash.

use crate::config::{TextSimHashConfig, TextSimHashError};
use crate::simhash::SimHash;
use crate::tokenize::{SpaceTokenizer, Tokenizer};

/// Keeps the `bits_to_keep` most-significant bits of a [`SimHash`].
#[derive(Debug, Clone)]
pub struct TruncatedSimHash<T = SpaceTokenizer> {
    bits_to_keep: u32,
    inner: SimHash<T>,
}

impl TruncatedSimHash<SpaceTokenizer> {
    pub fn new(bits_to_keep: u32, simhash_bits: u32) -> Result<Self, TextSimHashError> {
        Self::with_tokenizer(bits_to_keep, simhash_bits, SpaceTokenizer)
    }
}

impl<T: Tokenizer> TruncatedSimHash<T> {
    /// Fails with [`TextSimHashError::KeepExceedsSimhash`] when
    /// `bits_to_keep > simhash_bits`, and with
    /// [`TextSimHashError::TooManyBits`] when `simhash_bits > 128`.
    pub fn with_tokenizer(
        bits_to_keep: u32,
        simhash_bits: u32,
        tokenizer: T,
    ) -> Result<Self, TextSimHashError> {
        if bits_to_keep > simhash_bits {
            return Err(TextSimHashError::KeepExceedsSimhash {
                bits_to_keep,
                simhash_bits,
            });
        }
        let inner = SimHash::with_tokenizer(simhash_bits, tokenizer)?;
        Ok(Self {
            bits_to_keep,
            inner,
        })
    }

    /// Build from `cfg`. A missing `bits_to_keep` keeps every bit.
    pub fn from_config(cfg: &TextSimHashConfig, tokenizer: T) -> Result<Self, TextSimHashError> {
        cfg.validate()?;
        let inner = SimHash::from_config(cfg, tokenizer)?;
        Ok(Self {
            bits_to_keep: cfg.bits_to_keep.unwrap_or(cfg.n_bits),
            inner,
        })
    }

    pub fn bits_to_keep(&self) -> u32 {
        self.bits_to_keep
    }

    pub fn simhash_bits(&self) -> u32 {
        self.inner.n_bits()
    }

    /// The full-precision hasher this one truncates.
    pub fn inner(&self) -> &SimHash<T> {
        &self.inner
    }

    #[inline]
    fn shift(&self) -> u32 {
        self.inner.n_bits() - self.bits_to_keep
    }

    /// Compute the truncated hash of `document`, below `2^bits_to_keep`.
    pub fn hash_int(&self, document: &str) -> Result<u128, TextSimHashError> {
        let full = self.inner.hash_int(document)?;
        Ok(full.checked_shr(self.shift()).unwrap_or(0))
    }

    /// Lowercase hex without padding.
    ///
    /// When both widths are multiples of 8 and the truncated value is
    /// non-zero this is a prefix of the full hash's hex form. A zero value
    /// renders as `"0"`, which the full hex drops as a leading zero.
    pub fn hash_hex(&self, document: &str) -> Result<String, TextSimHashError> {
        self.hash_int(document).map(|h| format!("{h:x}"))
    }

    pub fn hash_batch<S>(&self, documents: &[S]) -> Result<Vec<u128>, TextSimHashError>
    where
        S: AsRef<str> + Sync,
    {
        let shift = self.shift();
        let full = self.inner.hash_batch(documents)?;
        Ok(full
            .into_iter()
            .map(|h| h.checked_shr(shift).unwrap_or(0))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_keeping_more_than_simhash() {
        assert_eq!(
            TruncatedSimHash::new(9, 8).unwrap_err(),
            TextSimHashError::KeepExceedsSimhash {
                bits_to_keep: 9,
                simhash_bits: 8,
            }
        );
    }

    #[test]
    fn rejects_oversized_simhash() {
        assert_eq!(
            TruncatedSimHash::new(8, 129).unwrap_err(),
            TextSimHashError::TooManyBits { n_bits: 129 }
        );
    }

    #[test]
    fn hex_prefix_holds_only_for_nonzero_values() {
        let doc = "the quick brown fox jumps over the lazy dog";
        let fine = SimHash::new(64).unwrap().hash_hex(doc).unwrap();
        assert_eq!(fine, "fd43cf8cd8b66ce");

        let coarse = TruncatedSimHash::new(16, 64).unwrap().hash_hex(doc).unwrap();
        assert_eq!(coarse, "fd4");
        assert!(fine.starts_with(&coarse));

        let empty = TruncatedSimHash::new(0, 8).unwrap();
        assert_eq!(empty.hash_hex("a b c").unwrap(), "0");
        assert_eq!(SimHash::new(8).unwrap().hash_hex("a b c").unwrap(), "a");
    }

    #[test]
    fn truncation_is_a_right_shift_of_the_full_hash() {
        let doc = "the quick brown fox jumps over the lazy dog";
        let full = SimHash::new(64).unwrap().hash_int(doc).unwrap();
        for keep in 0..=64 {
            let truncated = TruncatedSimHash::new(keep, 64).unwrap();
            assert_eq!(truncated.hash_int(doc).unwrap(), full >> (64 - keep));
        }
    }

    #[test]
    fn golden_fox_sixteen_of_sixty_four() {
        let hasher = TruncatedSimHash::new(16, 64).unwrap();
        let doc = "the quick brown fox jumps over the lazy dog";
        assert_eq!(hasher.hash_hex(doc).unwrap(), "fd4");
    }

    #[test]
    fn keeping_all_bits_is_identity() {
        let doc = "a b c";
        assert_eq!(
            TruncatedSimHash::new(128, 128).unwrap().hash_int(doc).unwrap(),
            SimHash::new(128).unwrap().hash_int(doc).unwrap()
        );
    }

    #[test]
    fn keeping_zero_bits_is_zero() {
        let hasher = TruncatedSimHash::new(0, 128).unwrap();
        assert_eq!(hasher.hash_int("anything at all").unwrap(), 0);
    }

    #[test]
    fn single_bit_is_binary() {
        for n_bits in 1..=128 {
            let hasher = TruncatedSimHash::new(1, n_bits).unwrap();
            assert!(hasher.hash_int("some document text").unwrap() < 2);
        }
    }

    #[test]
    fn hex_is_prefix_at_byte_aligned_widths() {
        let doc = "a b c";
        let full = SimHash::new(128).unwrap().hash_hex(doc).unwrap();
        let coarse = TruncatedSimHash::new(32, 128).unwrap().hash_hex(doc).unwrap();
        assert!(full.starts_with(&coarse), "{coarse} is not a prefix of {full}");
    }

    #[test]
    fn from_config_without_keep_uses_full_width() {
        let cfg = TextSimHashConfig::new().with_n_bits(24);
        let hasher = TruncatedSimHash::from_config(&cfg, SpaceTokenizer).unwrap();
        assert_eq!(hasher.bits_to_keep(), 24);
        assert_eq!(hasher.simhash_bits(), 24);
    }

    #[test]
    fn from_config_validates() {
        let cfg = TextSimHashConfig::new().with_n_bits(8).with_bits_to_keep(16);
        assert!(matches!(
            TruncatedSimHash::from_config(&cfg, SpaceTokenizer),
            Err(TextSimHashError::KeepExceedsSimhash { .. })
        ));
    }

    #[test]
    fn batch_matches_single_calls() {
        let hasher = TruncatedSimHash::new(12, 48).unwrap();
        let docs = ["alpha beta", "beta gamma", "gamma delta epsilon"];
        let expected: Vec<u128> = docs.iter().map(|d| hasher.hash_int(d).unwrap()).collect();
        assert_eq!(hasher.hash_batch(&docs).unwrap(), expected);
    }
}
