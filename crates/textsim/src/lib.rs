//! # Text SimHash
//!
//! Locality-sensitive fingerprints for text documents. Similar documents map
//! to similar, often identical, fixed-width bit patterns, which makes them
//! usable as cohort identifiers without comparing raw text.
//!
//! ## Contract
//!
//! - Hashing is a pure function of `(document, tokenizer, config)`: no I/O,
//!   no clocks, no global state, no caching between calls.
//! - Configuration errors surface when a hasher is constructed, never at
//!   hash time.
//! - MD5 is only used as a uniform bit source; these hashes carry no
//!   security guarantee.
//!
//! ## Pipeline
//!
//! 1.  **Tokenize** the document with a [`Tokenizer`] (by default, split on
//!     the space character).
//! 2.  **Clip** each token's MD5 digest to its top `n_bits` bits.
//! 3.  **Vote**: bit `i` of the hash is 1 iff strictly more than half of the
//!     clipped digests have bit `i` set.
//!
//! [`TruncatedSimHash`] keeps only the leading `bits_to_keep` bits of that
//! result, giving coarser cohorts that nest inside the finer ones.
//!
//! ## Example Usage
//!
//! ```
//! use textsim::{SimHash, TruncatedSimHash};
//!
//! let fine = SimHash::new(64).unwrap();
//! let coarse = TruncatedSimHash::new(16, 64).unwrap();
//!
//! let doc = "the quick brown fox jumps over the lazy dog";
//! let full = fine.hash_int(doc).unwrap();
//!
//! assert_eq!(coarse.hash_int(doc).unwrap(), full >> 48);
//! ```
//!
pub mod config;
pub mod consensus;
pub mod digest;
pub mod fingerprint;
mod simhash;
pub mod tokenize;
mod truncated;

pub use crate::config::{TextSimHashConfig, TextSimHashError};
pub use crate::consensus::bit_consensus;
pub use crate::digest::{DIGEST_BITS, clip_digest};
pub use crate::fingerprint::{Fingerprint, hamming_distance, to_padded_hex};
pub use crate::simhash::SimHash;
pub use crate::tokenize::{
    BuiltinTokenizer, NormalizingTokenizer, SpaceTokenizer, Tokenizer, WhitespaceTokenizer,
};
pub use crate::truncated::TruncatedSimHash;

/// Human-readable algorithm identifier.
pub const TEXT_SIMHASH_ALGORITHM: &str = "md5clip_bitmajority_v1";
