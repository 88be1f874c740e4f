//! # External Collaborators
//!
//! The codec only sees [`PixelGrid`](crate::codec::PixelGrid)s. This module
//! supplies them from image files and turns recovered text back into a picture.
//!
//! - [`store`]: load/save pixel grids via the `image` crate
//! - [`render`]: draw text onto a fixed-size canvas

pub mod render;
pub mod store;

pub use render::{save_rendered, CanvasRenderer, RenderError, RenderSettings, TextRenderer};
pub use store::{FsImageStore, ImageStore, StoreError};
