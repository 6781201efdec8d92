//! Bitwise majority vote over fixed-width integers.
//!
//! This is the SimHash combining step: every bit position of the output is
//! decided independently by the values' votes at that position. It does not
//! care where the values came from.

use crate::config::TextSimHashError;
use crate::digest::DIGEST_BITS;

/// Compute the `n_bits` majority fingerprint of `values`.
///
/// Bit `i` of the result is 1 iff strictly more than half of the values have
/// bit `i` set. Ties resolve to 0. Bit `i` contributes `2^i` to the result.
pub fn bit_consensus(values: &[u128], n_bits: u32) -> Result<u128, TextSimHashError> {
    if values.is_empty() {
        return Err(TextSimHashError::EmptyInput);
    }
    if n_bits > DIGEST_BITS {
        return Err(TextSimHashError::TooManyBits { n_bits });
    }

    let total = values.len();
    let mut result = 0u128;
    for bit in 0..n_bits {
        let ones = values.iter().filter(|&&v| (v >> bit) & 1 == 1).count();
        // ones / total > 0.5, kept in integers.
        if ones * 2 > total {
            result |= 1u128 << bit;
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_rejected() {
        assert_eq!(bit_consensus(&[], 8), Err(TextSimHashError::EmptyInput));
    }

    #[test]
    fn too_many_bits_rejected() {
        assert_eq!(
            bit_consensus(&[1], 129),
            Err(TextSimHashError::TooManyBits { n_bits: 129 })
        );
    }

    #[test]
    fn single_value_is_its_own_consensus() {
        assert_eq!(bit_consensus(&[0b1011_0010], 8), Ok(0b1011_0010));
        assert_eq!(bit_consensus(&[0], 8), Ok(0));
    }

    #[test]
    fn bits_above_width_are_ignored() {
        assert_eq!(bit_consensus(&[0xFFFF], 4), Ok(0xF));
    }

    #[test]
    fn strict_majority_of_hundred() {
        let mut values = vec![0u128; 100];
        for v in values.iter_mut().take(51) {
            *v = 1;
        }
        assert_eq!(bit_consensus(&values, 1), Ok(1));

        values[50] = 0;
        assert_eq!(bit_consensus(&values, 1), Ok(0), "exact tie resolves to 0");
    }

    #[test]
    fn per_bit_votes_are_independent() {
        // bit 0: 2/3, bit 1: 1/3, bit 2: 3/3, bit 3: 0/3
        let values = [0b0101, 0b0111, 0b0100];
        assert_eq!(bit_consensus(&values, 4), Ok(0b0101));
    }

    #[test]
    fn top_bit_of_128_is_reachable() {
        let top = 1u128 << 127;
        assert_eq!(bit_consensus(&[top, top, 0], 128), Ok(top));
    }

    #[test]
    fn zero_bits_yields_zero() {
        assert_eq!(bit_consensus(&[u128::MAX], 0), Ok(0));
    }
}
