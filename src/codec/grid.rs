//! # Pixel Grid
//!
//! Owned `(height, width, channels)` buffer of 8-bit samples, stored row-major
//! with channels interleaved: sample `(row, col, ch)` lives at
//! `(row * width + col) * channels + ch`.

use super::error::GridError;

/// Number of channels per pixel that carry payload bits (R, G, B).
pub const DATA_CHANNELS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    height: usize,
    width: usize,
    channels: usize,
    data: Vec<u8>,
}

impl PixelGrid {
    /// Creates a zero-filled grid.
    pub fn new(height: usize, width: usize, channels: usize) -> Result<Self, GridError> {
        Self::from_raw(height, width, channels, vec![0; height * width * channels])
    }

    /// Wraps an existing sample buffer, checking that it matches the shape.
    pub fn from_raw(
        height: usize,
        width: usize,
        channels: usize,
        data: Vec<u8>,
    ) -> Result<Self, GridError> {
        if channels < DATA_CHANNELS {
            return Err(GridError::TooFewChannels(channels));
        }

        let expected = height * width * channels;
        if data.len() != expected {
            return Err(GridError::SizeMismatch {
                height,
                width,
                channels,
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            height,
            width,
            channels,
            data,
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Total number of LSB slots available for payload bits.
    pub fn capacity_bits(&self) -> usize {
        self.height * self.width * DATA_CHANNELS
    }

    /// Returns the sample at `(row, col, ch)`, or `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize, ch: usize) -> Option<u8> {
        if row >= self.height || col >= self.width || ch >= self.channels {
            return None;
        }
        Some(self.data[self.index(row, col, ch)])
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Iterates the data-bearing samples in embedding order: rows top to
    /// bottom, columns left to right, then R, G, B. Extra channels are skipped.
    pub(crate) fn data_samples(&self) -> impl Iterator<Item = u8> + '_ {
        self.data
            .chunks_exact(self.channels)
            .flat_map(|pixel| pixel.iter().take(DATA_CHANNELS).copied())
    }

    /// Mutable counterpart of [`data_samples`](Self::data_samples).
    pub(crate) fn data_samples_mut(&mut self) -> impl Iterator<Item = &mut u8> + '_ {
        self.data
            .chunks_exact_mut(self.channels)
            .flat_map(|pixel| pixel.iter_mut().take(DATA_CHANNELS))
    }

    fn index(&self, row: usize, col: usize, ch: usize) -> usize {
        (row * self.width + col) * self.channels + ch
    }
}
