//! # Text Renderer
//!
//! Draws recovered text onto a blank canvas so it can be viewed as an image.
//! Glyphs come from the 8x8 bitmap fonts in `font8x8`.

use std::path::Path;

use font8x8::{UnicodeFonts, BASIC_FONTS, LATIN_FONTS};
use image::{Rgb, RgbImage};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Side length of one glyph cell before scaling.
const GLYPH_SIZE: u32 = 8;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write rendered text: {0}")]
    Image(#[from] image::ImageError),
}

/// Canvas geometry and colours.
///
/// # Example TOML
///
/// ```toml
/// [render]
/// width = 800
/// height = 600
/// background = [73, 109, 137]
/// foreground = [255, 255, 0]
/// origin = [10, 10]
/// scale = 1
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
    pub background: [u8; 3],
    pub foreground: [u8; 3],
    /// Top-left corner of the first glyph, `[x, y]`.
    pub origin: [u32; 2],
    /// Integer magnification of each glyph pixel.
    pub scale: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            background: [73, 109, 137],
            foreground: [255, 255, 0],
            origin: [10, 10],
            scale: 1,
        }
    }
}

pub trait TextRenderer {
    fn render(&self, text: &str) -> RgbImage;
}

/// Renders text left to right from the configured origin. `\n` starts a new
/// line, glyphs that would cross the right edge wrap, and anything below the
/// bottom edge is dropped.
#[derive(Debug, Clone, Default)]
pub struct CanvasRenderer {
    settings: RenderSettings,
}

impl CanvasRenderer {
    pub fn new(settings: RenderSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    fn draw_glyph(&self, canvas: &mut RgbImage, glyph: [u8; 8], x: u32, y: u32) {
        let scale = self.settings.scale.max(1);
        let color = Rgb(self.settings.foreground);

        for (row, bits) in (0u32..).zip(glyph) {
            let top = y.saturating_add(row.saturating_mul(scale));
            if top >= canvas.height() {
                break;
            }
            let bottom = top.saturating_add(scale).min(canvas.height());

            for col in 0..GLYPH_SIZE {
                let left = x.saturating_add(col.saturating_mul(scale));
                if left >= canvas.width() {
                    break;
                }
                // font8x8 stores the leftmost pixel in bit 0
                if bits & (1 << col) == 0 {
                    continue;
                }
                let right = left.saturating_add(scale).min(canvas.width());

                for py in top..bottom {
                    for px in left..right {
                        canvas.put_pixel(px, py, color);
                    }
                }
            }
        }
    }
}

impl TextRenderer for CanvasRenderer {
    fn render(&self, text: &str) -> RgbImage {
        let s = &self.settings;
        let mut canvas = RgbImage::from_pixel(s.width, s.height, Rgb(s.background));

        let cell = GLYPH_SIZE.saturating_mul(s.scale.max(1));
        let [left, top] = s.origin;
        let (mut x, mut y) = (left, top);

        for ch in text.chars() {
            if ch == '\n' {
                x = left;
                y = y.saturating_add(cell);
                if y >= s.height {
                    break;
                }
                continue;
            }
            if x > left && x.saturating_add(cell) > s.width {
                x = left;
                y = y.saturating_add(cell);
            }
            if y >= s.height {
                break;
            }

            self.draw_glyph(&mut canvas, glyph_for(ch), x, y);
            x = x.saturating_add(cell);
        }

        canvas
    }
}

/// Looks up a glyph, falling back to `?` for characters the fonts lack.
fn glyph_for(ch: char) -> [u8; 8] {
    BASIC_FONTS
        .get(ch)
        .or_else(|| LATIN_FONTS.get(ch))
        .or_else(|| BASIC_FONTS.get('?'))
        .unwrap_or([0; 8])
}

/// Saves a rendered canvas; the format follows the file extension.
pub fn save_rendered(image: &RgbImage, path: &Path) -> Result<(), RenderError> {
    image.save(path)?;
    Ok(())
}
