//! # Codec Errors
//!
//! Typed failures of the encoder, the decoder and the pixel grid.

use thiserror::Error;

/// Errors raised while embedding a payload. Both variants are detected
/// before the grid copy is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// The payload bitstream does not fit into the image's channel LSBs.
    #[error("image too small to hide the text: need {required_bits} bits but only {available_bits} available")]
    Capacity {
        required_bits: usize,
        available_bits: usize,
    },

    /// A payload character lies outside the single-byte range 0-255.
    #[error("character {ch:?} at position {index} does not fit in a single byte")]
    UnsupportedCharacter { ch: char, index: usize },
}

/// Errors raised while recovering a payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The recovered text does not start with the supplied key.
    #[error("incorrect key, text not decrypted")]
    KeyMismatch,

    /// The image is too small to even hold a length prefix.
    #[error("image holds {available_bits} bits, too few for a {prefix_bits}-bit length prefix")]
    MissingLengthPrefix {
        available_bits: usize,
        prefix_bits: usize,
    },

    /// A length prefix claims more bytes than the image can hold.
    #[error("embedded length {declared} exceeds the {available} bytes the image can hold")]
    LengthOutOfRange { declared: usize, available: usize },
}

/// Errors raised when building a [`PixelGrid`](super::PixelGrid).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("pixel grid needs at least 3 channels, got {0}")]
    TooFewChannels(usize),

    #[error("buffer holds {actual} samples but {height}x{width}x{channels} needs {expected}")]
    SizeMismatch {
        height: usize,
        width: usize,
        channels: usize,
        expected: usize,
        actual: usize,
    },
}
