//! # Stego Session
//!
//! Composes the image store, the codec and the text renderer into the two
//! user-level workflows:
//!
//! - **Encrypt**: load cover → embed `key + text` → save to the output path
//! - **Decrypt**: load image → recover and check key → optionally render text
//!
//! Nothing is written unless the in-memory transform succeeds, so a capacity
//! failure never leaves a partial output file behind. A preview that cannot be
//! saved is logged and skipped; the recovered text is still returned.

use anyhow::Result;
use log::{info, warn};
use std::path::{Path, PathBuf};

use crate::codec::{self, bits::BITS_PER_BYTE, DecodeError, Framing};
use crate::common::config::StegoConfig;
use crate::io::{save_rendered, CanvasRenderer, FsImageStore, ImageStore, TextRenderer};

/// Text recovered by [`StegoSession::decrypt`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recovered {
    pub text: String,
    /// Where the preview was saved, if one was requested and written.
    pub rendered_to: Option<PathBuf>,
}

/// Capacity report for a cover image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityReport {
    pub width: usize,
    pub height: usize,
    pub bits: usize,
    /// Characters of `key + text` that fit with the configured framing.
    pub max_chars: usize,
}

pub struct StegoSession<S, R> {
    store: S,
    renderer: R,
    config: StegoConfig,
}

impl StegoSession<FsImageStore, CanvasRenderer> {
    /// Session over the local filesystem with the canvas renderer.
    pub fn from_config(config: StegoConfig) -> Self {
        let renderer = CanvasRenderer::new(config.render.clone());
        Self::new(FsImageStore, renderer, config)
    }
}

impl<S: ImageStore, R: TextRenderer> StegoSession<S, R> {
    pub fn new(store: S, renderer: R, config: StegoConfig) -> Self {
        Self {
            store,
            renderer,
            config,
        }
    }

    pub fn config(&self) -> &StegoConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    fn framing(&self) -> Framing {
        self.config.codec.framing
    }

    /// Hides `text` behind `key` in the image at `image_path`.
    ///
    /// The result goes to `output`, or to the configured encoded-image path.
    /// Returns the path written.
    pub fn encrypt(
        &self,
        image_path: &Path,
        text: &str,
        key: &str,
        output: Option<&Path>,
    ) -> Result<PathBuf> {
        let cover = self.store.load(image_path)?;
        let encoded = codec::encode_with(&cover, text, key, self.framing())?;

        let output = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.config.output.encoded_image_path.clone());
        self.store.save(&encoded, &output)?;

        info!(
            "Text hidden in {} ({} characters) and saved to {}",
            image_path.display(),
            key.chars().count() + text.chars().count(),
            output.display()
        );
        Ok(output)
    }

    /// Recovers the text hidden behind `key`.
    ///
    /// Reads `image_path`, or the configured encoded-image path. Returns
    /// `Ok(None)` on a key mismatch. When `render_to` is set, the text is also
    /// drawn and saved there; a failed save is logged and leaves
    /// [`Recovered::rendered_to`] empty.
    pub fn decrypt(
        &self,
        image_path: Option<&Path>,
        key: &str,
        render_to: Option<&Path>,
    ) -> Result<Option<Recovered>> {
        let image_path = image_path.unwrap_or(self.config.output.encoded_image_path.as_path());
        let grid = self.store.load(image_path)?;

        let text = match codec::decode_with(&grid, key, self.framing()) {
            Ok(text) => text,
            Err(DecodeError::KeyMismatch) => {
                warn!("Incorrect key for {}, text not decrypted", image_path.display());
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        info!(
            "Recovered {} characters from {}",
            text.chars().count(),
            image_path.display()
        );

        let rendered_to = render_to.and_then(|path| {
            let canvas = self.renderer.render(&text);
            match save_rendered(&canvas, path) {
                Ok(()) => {
                    info!("Retrieved text saved to {}", path.display());
                    Some(path.to_path_buf())
                }
                Err(e) => {
                    warn!("Could not save retrieved text to {}: {}", path.display(), e);
                    None
                }
            }
        });

        Ok(Some(Recovered { text, rendered_to }))
    }

    /// Reports how much text the image at `image_path` can carry.
    pub fn capacity(&self, image_path: &Path) -> Result<CapacityReport> {
        let grid = self.store.load(image_path)?;
        let bits = grid.capacity_bits();

        let usable = match self.framing() {
            Framing::Terminator => bits,
            Framing::LengthPrefixed => bits.saturating_sub(codec::framing::LENGTH_PREFIX_BITS),
        };

        Ok(CapacityReport {
            width: grid.width(),
            height: grid.height(),
            bits,
            max_chars: usable / BITS_PER_BYTE,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::codec::{EncodeError, PixelGrid};
    use crate::io::StoreError;
    use image::RgbImage;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// In-memory store keyed by path.
    #[derive(Default)]
    pub(crate) struct MemoryStore {
        pub(crate) images: RefCell<HashMap<PathBuf, PixelGrid>>,
    }

    impl MemoryStore {
        pub(crate) fn with(path: &str, grid: PixelGrid) -> Self {
            let store = Self::default();
            store.images.borrow_mut().insert(PathBuf::from(path), grid);
            store
        }
    }

    impl ImageStore for MemoryStore {
        fn load(&self, path: &Path) -> Result<PixelGrid, StoreError> {
            self.images.borrow().get(path).cloned().ok_or_else(|| {
                StoreError::Image(image::ImageError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    path.display().to_string(),
                )))
            })
        }

        fn save(&self, grid: &PixelGrid, path: &Path) -> Result<(), StoreError> {
            self.images
                .borrow_mut()
                .insert(path.to_path_buf(), grid.clone());
            Ok(())
        }
    }

    /// Renderer that records what it was asked to draw.
    #[derive(Default)]
    pub(crate) struct RecordingRenderer {
        pub(crate) calls: RefCell<Vec<String>>,
    }

    impl TextRenderer for RecordingRenderer {
        fn render(&self, text: &str) -> RgbImage {
            self.calls.borrow_mut().push(text.to_string());
            RgbImage::new(1, 1)
        }
    }

    pub(crate) fn session_with_cover(
        height: usize,
        width: usize,
    ) -> StegoSession<MemoryStore, RecordingRenderer> {
        let cover = PixelGrid::new(height, width, 3).unwrap();
        StegoSession::new(
            MemoryStore::with("cover.png", cover),
            RecordingRenderer::default(),
            StegoConfig::default(),
        )
    }

    #[test]
    fn test_encrypt_then_decrypt_default_paths() {
        let session = session_with_cover(10, 10);

        let written = session
            .encrypt(Path::new("cover.png"), "hi", "k", None)
            .unwrap();
        assert_eq!(written, PathBuf::from("encrypted_image.png"));

        let recovered = session.decrypt(None, "k", None).unwrap().unwrap();
        assert_eq!(recovered.text, "hi");
        assert_eq!(recovered.rendered_to, None);
        assert_eq!(session.decrypt(None, "j", None).unwrap(), None);
        assert!(session.renderer().calls.borrow().is_empty());
    }

    #[test]
    fn test_capacity_failure_writes_nothing() {
        let session = session_with_cover(1, 2);

        let err = session
            .encrypt(Path::new("cover.png"), "too long", "k", None)
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EncodeError>(),
            Some(EncodeError::Capacity { .. })
        ));
        assert_eq!(session.store().images.borrow().len(), 1);
    }

    #[test]
    fn test_unwritable_preview_still_returns_text() {
        let dir = tempfile::tempdir().unwrap();
        let session = session_with_cover(10, 10);
        session
            .encrypt(Path::new("cover.png"), "hello", "k", None)
            .unwrap();

        let render_to = dir.path().join("missing").join("retrieved_text.png");
        let recovered = session.decrypt(None, "k", Some(&render_to)).unwrap().unwrap();

        assert_eq!(recovered.text, "hello");
        assert_eq!(recovered.rendered_to, None);
        assert_eq!(*session.renderer().calls.borrow(), vec!["hello".to_string()]);
    }

    #[test]
    fn test_missing_image_is_an_error() {
        let session = session_with_cover(2, 2);
        assert!(session.decrypt(Some(Path::new("nope.png")), "k", None).is_err());
    }

    #[test]
    fn test_capacity_report_accounts_for_prefix() {
        let session = session_with_cover(10, 10);
        let report = session.capacity(Path::new("cover.png")).unwrap();
        assert_eq!(report.bits, 300);
        assert_eq!(report.max_chars, 37);

        let mut config = StegoConfig::default();
        config.codec.framing = Framing::LengthPrefixed;
        let session = StegoSession::new(
            MemoryStore::with("cover.png", PixelGrid::new(10, 10, 3).unwrap()),
            RecordingRenderer::default(),
            config,
        );
        assert_eq!(session.capacity(Path::new("cover.png")).unwrap().max_chars, 33);
    }
}
