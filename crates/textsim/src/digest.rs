//! Digest clipping: fixed-width integers from token bytes.
//!
//! Each token is digested with MD5 and the 128-bit result is read as a
//! big-endian unsigned integer. Only the top `n_bits` bits are kept. MD5 is
//! used here as a uniform bit source, not for integrity.

/// Width of the digest every token hash is clipped from.
pub const DIGEST_BITS: u32 = 128;

/// Return the most-significant `n_bits` bits of `MD5(token)`.
///
/// The result is always below `2^n_bits`. `n_bits == 0` keeps nothing and
/// returns 0. Widths above [`DIGEST_BITS`] return the full digest; hashers
/// reject such widths at construction.
#[inline]
pub fn clip_digest(token: &[u8], n_bits: u32) -> u128 {
    let digest = md5::compute(token);
    let value = u128::from_be_bytes(digest.0);
    value
        .checked_shr(DIGEST_BITS.saturating_sub(n_bits))
        .unwrap_or(0)
}
