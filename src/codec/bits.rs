//! Bit-packing convention shared by the encoder and decoder.
//!
//! Bytes expand MSB first. A payload bit replaces the least significant bit of
//! a channel sample; extraction reads that bit back.

/// Bits in one payload byte.
pub const BITS_PER_BYTE: usize = 8;

/// Writes `bit` into the LSB of `sample`.
#[inline]
pub fn embed(sample: u8, bit: u8) -> u8 {
    (sample & 0xFE) | (bit & 1)
}

/// Reads the LSB of `sample`.
#[inline]
pub fn extract(sample: u8) -> u8 {
    sample & 1
}

/// Expands bytes into bits, most significant bit first, in input order.
pub fn to_bits(bytes: &[u8]) -> impl Iterator<Item = u8> + '_ {
    bytes
        .iter()
        .flat_map(|&byte| (0..BITS_PER_BYTE).rev().map(move |shift| (byte >> shift) & 1))
}

/// Folds up to eight bits (MSB first) into a byte value.
///
/// A short group is read as a plain binary number, so `[1, 0, 1]` is 5.
pub fn from_bits(bits: &[u8]) -> u8 {
    bits.iter().fold(0, |acc, bit| (acc << 1) | (bit & 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embed_and_extract() {
        assert_eq!(embed(0b1010_1010, 1), 0b1010_1011);
        assert_eq!(embed(0b1010_1011, 0), 0b1010_1010);
        assert_eq!(embed(255, 1), 255);
        assert_eq!(extract(7), 1);
        assert_eq!(extract(6), 0);
    }

    #[test]
    fn test_to_bits_is_msb_first() {
        let bits: Vec<u8> = to_bits(b"h").collect();
        // 'h' = 0x68 = 0110_1000
        assert_eq!(bits, vec![0, 1, 1, 0, 1, 0, 0, 0]);
    }

    #[test]
    fn test_from_bits_short_group() {
        assert_eq!(from_bits(&[0, 1, 1, 0, 1, 0, 0, 0]), b'h');
        assert_eq!(from_bits(&[1, 0, 1]), 5);
        assert_eq!(from_bits(&[]), 0);
    }
}
