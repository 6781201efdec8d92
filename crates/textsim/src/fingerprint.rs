//! Fingerprint value type and output helpers.
//!
//! Hashers return bare integers and unpadded hex. Consumers that need
//! canonical fixed-width strings, or want to compare fingerprints, use the
//! helpers here.

use serde::{Deserialize, Serialize};

/// A hash value together with the number of bits it was computed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint {
    pub value: u128,
    pub bits: u32,
}

impl Fingerprint {
    pub fn new(value: u128, bits: u32) -> Self {
        Self { value, bits }
    }

    /// Lowercase hex without padding, as the hashers render it.
    pub fn to_hex(&self) -> String {
        format!("{:x}", self.value)
    }

    /// Fixed-width hex with `ceil(bits / 4)` digits.
    pub fn to_padded_hex(&self) -> String {
        to_padded_hex(self.value, self.bits)
    }

    /// Number of differing bits between two fingerprints.
    pub fn hamming_distance(&self, other: &Fingerprint) -> u32 {
        hamming_distance(self.value, other.value)
    }
}

/// Render `value` as lowercase hex padded to `ceil(n_bits / 4)` digits.
///
/// A zero-width value renders as `"0"`.
pub fn to_padded_hex(value: u128, n_bits: u32) -> String {
    let width = n_bits.div_ceil(4).max(1) as usize;
    format!("{value:0width$x}")
}

/// Number of bit positions where `a` and `b` differ.
#[inline]
pub fn hamming_distance(a: u128, b: u128) -> u32 {
    (a ^ b).count_ones()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_hex_widths() {
        assert_eq!(to_padded_hex(0xa, 8), "0a");
        assert_eq!(to_padded_hex(0xa, 9), "00a");
        assert_eq!(to_padded_hex(0x1, 1), "1");
        assert_eq!(to_padded_hex(0, 0), "0");
        assert_eq!(to_padded_hex(0xacb5df8c4b7b7ac, 64), "0acb5df8c4b7b7ac");
        assert_eq!(to_padded_hex(u128::MAX, 128), "f".repeat(32));
    }

    #[test]
    fn unpadded_hex_matches_hashers() {
        let fp = Fingerprint::new(0x0fd4, 16);
        assert_eq!(fp.to_hex(), "fd4");
        assert_eq!(fp.to_padded_hex(), "0fd4");
    }

    #[test]
    fn hamming_distance_counts_bits() {
        assert_eq!(hamming_distance(0, 0), 0);
        assert_eq!(hamming_distance(0b1010, 0b0101), 4);
        assert_eq!(hamming_distance(u128::MAX, 0), 128);

        let a = Fingerprint::new(0b1100, 4);
        let b = Fingerprint::new(0b1000, 4);
        assert_eq!(a.hamming_distance(&b), 1);
    }

    #[test]
    fn fingerprint_serde_roundtrip() {
        let fp = Fingerprint::new(0xdead_beef, 32);
        let json = serde_json::to_string(&fp).unwrap();
        let back: Fingerprint = serde_json::from_str(&json).unwrap();
        assert_eq!(fp, back);
    }
}
