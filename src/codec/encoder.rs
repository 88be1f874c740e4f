//! # Encoder
//!
//! Embeds `key + text` into the least significant bits of a pixel grid.
//!
//! ## Algorithm
//! 1. Concatenate key and text, map each character to one byte (Latin-1)
//! 2. Optionally prepend a 4-byte big-endian length (see [`Framing`])
//! 3. Expand the bytes MSB first and check them against `height * width * 3`
//! 4. Copy the grid and overwrite one channel LSB per bit, row-major, R → G → B
//!
//! Channels after the bitstream ends keep their original values, as do
//! channels past the third (alpha).

use log::debug;

use super::bits::{self, BITS_PER_BYTE};
use super::error::EncodeError;
use super::framing::{Framing, LENGTH_PREFIX_BITS};
use super::grid::PixelGrid;

/// Embeds `key + text` using the default [`Framing::Terminator`] mode.
///
/// The input grid is never modified; the result is a fresh copy.
///
/// # Errors
/// - [`EncodeError::Capacity`] if the payload needs more bits than the grid has
/// - [`EncodeError::UnsupportedCharacter`] for characters above U+00FF
///
/// # Example
/// ```
/// use lsb_stego::codec::{decode, encode, PixelGrid};
///
/// let cover = PixelGrid::new(10, 10, 3).unwrap();
/// let stego = encode(&cover, "hi", "k").unwrap();
/// assert_eq!(decode(&stego, "k").unwrap(), "hi");
/// ```
pub fn encode(grid: &PixelGrid, text: &str, key: &str) -> Result<PixelGrid, EncodeError> {
    encode_with(grid, text, key, Framing::Terminator)
}

/// Embeds `key + text` with an explicit framing mode.
pub fn encode_with(
    grid: &PixelGrid,
    text: &str,
    key: &str,
    framing: Framing,
) -> Result<PixelGrid, EncodeError> {
    let payload = payload_bytes(key, text)?;
    let available_bits = grid.capacity_bits();

    let mut data_to_embed = Vec::with_capacity(payload.len() + LENGTH_PREFIX_BITS / BITS_PER_BYTE);
    if framing == Framing::LengthPrefixed {
        data_to_embed.extend_from_slice(&length_prefix(payload.len(), available_bits)?);
    }
    data_to_embed.extend_from_slice(&payload);

    let required_bits = data_to_embed.len() * BITS_PER_BYTE;
    if required_bits > available_bits {
        return Err(EncodeError::Capacity {
            required_bits,
            available_bits,
        });
    }

    debug!(
        "Embedding {} payload bytes ({} of {} bits, {:?})",
        payload.len(),
        required_bits,
        available_bits,
        framing
    );

    let mut encoded = grid.clone();
    for (sample, bit) in encoded
        .data_samples_mut()
        .zip(bits::to_bits(&data_to_embed))
    {
        *sample = bits::embed(*sample, bit);
    }

    Ok(encoded)
}

/// Big-endian `u32` length header. A payload too long for the header can
/// never fit either, so it is reported as a capacity failure.
fn length_prefix(len: usize, available_bits: usize) -> Result<[u8; 4], EncodeError> {
    u32::try_from(len)
        .map(u32::to_be_bytes)
        .map_err(|_| EncodeError::Capacity {
            required_bits: len
                .saturating_add(LENGTH_PREFIX_BITS / BITS_PER_BYTE)
                .saturating_mul(BITS_PER_BYTE),
            available_bits,
        })
}

/// Maps `key + text` to single bytes, rejecting anything above U+00FF.
fn payload_bytes(key: &str, text: &str) -> Result<Vec<u8>, EncodeError> {
    key.chars()
        .chain(text.chars())
        .enumerate()
        .map(|(index, ch)| {
            u8::try_from(u32::from(ch)).map_err(|_| EncodeError::UnsupportedCharacter { ch, index })
        })
        .collect()
}
