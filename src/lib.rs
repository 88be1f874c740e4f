//! Text-in-image LSB steganography.
//!
//! - [`codec`]: the bit-level encoder and decoder over an in-memory [`PixelGrid`]
//! - [`io`]: loading and saving images, drawing recovered text
//! - [`common`]: configuration and logging setup
//! - [`app`]: encrypt / decrypt workflows and the interactive menu

pub mod app;
pub mod codec;
pub mod common;
pub mod io;

pub use codec::{decode, encode, DecodeError, EncodeError, Framing, PixelGrid};
