//! # Decoder
//!
//! Recovers `key + text` from the channel LSBs of a pixel grid and verifies
//! the key prefix.
//!
//! ## Decoding Process
//! 1. Read the LSB of every R, G, B sample in row-major order (the whole image)
//! 2. Regroup the bits into bytes, MSB first
//! 3. Stop at the first `00000000` byte; earlier bytes become characters
//! 4. Accept the result only if it starts with the key, and strip it
//!
//! With [`Framing::LengthPrefixed`] step 3 instead reads a 32-bit length and
//! then exactly that many bytes.

use log::debug;

use super::bits::{self, BITS_PER_BYTE};
use super::error::DecodeError;
use super::framing::{Framing, LENGTH_PREFIX_BITS};
use super::grid::PixelGrid;

/// Recovers the text hidden under `key` using the default
/// [`Framing::Terminator`] mode.
///
/// # Errors
/// [`DecodeError::KeyMismatch`] when the recovered string does not start with
/// `key`. No partial text is returned in that case.
pub fn decode(grid: &PixelGrid, key: &str) -> Result<String, DecodeError> {
    decode_with(grid, key, Framing::Terminator)
}

/// Recovers the text hidden under `key` with an explicit framing mode.
pub fn decode_with(grid: &PixelGrid, key: &str, framing: Framing) -> Result<String, DecodeError> {
    let lsbs: Vec<u8> = grid.data_samples().map(bits::extract).collect();

    let recovered = match framing {
        Framing::Terminator => read_until_terminator(&lsbs),
        Framing::LengthPrefixed => read_length_prefixed(&lsbs)?,
    };

    debug!(
        "Recovered {} characters from {} LSBs",
        recovered.chars().count(),
        lsbs.len()
    );

    recovered
        .strip_prefix(key)
        .map(str::to_owned)
        .ok_or(DecodeError::KeyMismatch)
}

/// Collects bytes up to, not including, the first all-zero byte.
///
/// A trailing group of fewer than eight bits is still read as a binary number.
fn read_until_terminator(lsbs: &[u8]) -> String {
    lsbs.chunks(BITS_PER_BYTE)
        .take_while(|group| *group != [0u8; BITS_PER_BYTE])
        .map(|group| char::from(bits::from_bits(group)))
        .collect()
}

fn read_length_prefixed(lsbs: &[u8]) -> Result<String, DecodeError> {
    if lsbs.len() < LENGTH_PREFIX_BITS {
        return Err(DecodeError::MissingLengthPrefix {
            available_bits: lsbs.len(),
            prefix_bits: LENGTH_PREFIX_BITS,
        });
    }

    let (prefix, body) = lsbs.split_at(LENGTH_PREFIX_BITS);
    let declared = prefix
        .iter()
        .fold(0usize, |acc, &bit| (acc << 1) | usize::from(bit));

    let available = body.len() / BITS_PER_BYTE;
    if declared > available {
        return Err(DecodeError::LengthOutOfRange {
            declared,
            available,
        });
    }

    Ok(body
        .chunks_exact(BITS_PER_BYTE)
        .take(declared)
        .map(|group| char::from(bits::from_bits(group)))
        .collect())
}
