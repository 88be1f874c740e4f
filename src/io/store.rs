//! # Image Store
//!
//! Moves pixel grids between disk and memory. Any format the `image` crate can
//! decode is accepted on load. Grids are always written as PNG, since a lossy
//! format would destroy the LSBs; a destination without a `.png` extension is
//! rejected before anything is written.

use std::path::{Path, PathBuf};

use image::{DynamicImage, GenericImageView, ImageFormat, RgbImage, RgbaImage};
use log::debug;
use thiserror::Error;

use crate::codec::{GridError, PixelGrid};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("cannot save a grid with {0} channels (expected 3 or 4)")]
    UnsupportedChannels(usize),

    #[error("encoded images must be saved as PNG, not {}", .0.display())]
    NotPng(PathBuf),

    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Source and sink of pixel grids.
pub trait ImageStore {
    fn load(&self, path: &Path) -> Result<PixelGrid, StoreError>;

    /// Writes `grid` to `path`, replacing any existing file.
    fn save(&self, grid: &PixelGrid, path: &Path) -> Result<(), StoreError>;
}

/// [`ImageStore`] backed by image files on the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsImageStore;

impl ImageStore for FsImageStore {
    fn load(&self, path: &Path) -> Result<PixelGrid, StoreError> {
        let img = image::open(path)?;
        let grid = grid_from_image(&img)?;

        debug!(
            "Loaded {} ({}x{}, {} channels)",
            path.display(),
            grid.width(),
            grid.height(),
            grid.channels()
        );

        Ok(grid)
    }

    fn save(&self, grid: &PixelGrid, path: &Path) -> Result<(), StoreError> {
        if !matches!(ImageFormat::from_path(path), Ok(ImageFormat::Png)) {
            return Err(StoreError::NotPng(path.to_path_buf()));
        }

        let width = grid.width() as u32;
        let height = grid.height() as u32;
        let size_mismatch = || GridError::SizeMismatch {
            height: grid.height(),
            width: grid.width(),
            channels: grid.channels(),
            expected: grid.height() * grid.width() * grid.channels(),
            actual: grid.as_raw().len(),
        };

        match grid.channels() {
            3 => RgbImage::from_raw(width, height, grid.as_raw().to_vec())
                .ok_or_else(size_mismatch)?
                .save_with_format(path, ImageFormat::Png)?,
            4 => RgbaImage::from_raw(width, height, grid.as_raw().to_vec())
                .ok_or_else(size_mismatch)?
                .save_with_format(path, ImageFormat::Png)?,
            other => return Err(StoreError::UnsupportedChannels(other)),
        }

        debug!("Saved {}", path.display());
        Ok(())
    }
}

/// Converts a decoded image into a grid. Images with alpha keep it as a
/// fourth channel; everything else (grey, 16-bit, ...) becomes 8-bit RGB.
pub fn grid_from_image(img: &DynamicImage) -> Result<PixelGrid, GridError> {
    let (width, height) = img.dimensions();

    let (channels, data) = if img.color().has_alpha() {
        (4, img.to_rgba8().into_raw())
    } else {
        (3, img.to_rgb8().into_raw())
    };

    PixelGrid::from_raw(height as usize, width as usize, channels, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgba};

    #[test]
    fn test_grey_image_becomes_rgb() {
        let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(3, 2, Luma([9])));
        let grid = grid_from_image(&img).unwrap();

        assert_eq!((grid.height(), grid.width(), grid.channels()), (2, 3, 3));
        assert!(grid.as_raw().iter().all(|&s| s == 9));
    }

    #[test]
    fn test_alpha_is_kept_as_fourth_channel() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 4])));
        let grid = grid_from_image(&img).unwrap();

        assert_eq!(grid.channels(), 4);
        assert_eq!(grid.get(1, 1, 3), Some(4));
    }

    #[test]
    fn test_save_rejects_five_channels() {
        let grid = PixelGrid::new(1, 1, 5).unwrap();
        let err = FsImageStore.save(&grid, Path::new("unused.png")).unwrap_err();
        assert!(matches!(err, StoreError::UnsupportedChannels(5)));
    }

    #[test]
    fn test_save_rejects_lossy_and_unknown_extensions() {
        let dir = tempfile::tempdir().unwrap();
        let grid = PixelGrid::new(2, 2, 3).unwrap();

        for name in ["stego.jpg", "stego.JPEG", "stego.webp", "stego"] {
            let path = dir.path().join(name);
            let err = FsImageStore.save(&grid, &path).unwrap_err();
            assert!(matches!(err, StoreError::NotPng(ref p) if *p == path));
            assert!(!path.exists());
        }

        let path = dir.path().join("stego.PNG");
        FsImageStore.save(&grid, &path).unwrap();
        assert_eq!(FsImageStore.load(&path).unwrap(), grid);
    }
}
