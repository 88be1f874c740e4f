//! # LSB Steganography Codec
//!
//! Hides a text payload in the least significant bit of each R, G and B sample
//! of a [`PixelGrid`], and recovers it again.
//!
//! ## Layout
//!
//! The payload is `key + text`, one byte per character, expanded MSB first.
//! Bits are written row by row, left to right, R → G → B within a pixel. No
//! terminator is written: the decoder stops at the first all-zero byte it
//! reads back (see [`Framing`] for the opt-in length-prefixed mode).
//!
//! ## Capacity
//! A grid holds `height * width * 3` bits, so an 800x600 image fits
//! 180 000 characters of key and text.
//!
//! The key is a plaintext prefix checked on decode, not an encryption key.

pub mod bits;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod framing;
pub mod grid;

pub use decoder::{decode, decode_with};
pub use encoder::{encode, encode_with};
pub use error::{DecodeError, EncodeError, GridError};
pub use framing::Framing;
pub use grid::PixelGrid;
