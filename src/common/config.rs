//! # Configuration Utilities
//!
//! TOML configuration for output locations, the text renderer and the codec's
//! framing mode. Every field has a default, so an empty file (or no file at
//! all) reproduces the classic behavior: `encrypted_image.png`,
//! `retrieved_text.png`, an 800x600 canvas and terminator framing.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::codec::Framing;
use crate::io::RenderSettings;

/// Load a TOML configuration file and deserialize it into the specified type.
///
/// # Arguments
/// - `path`: Path to the TOML configuration file
///
/// # Returns
/// - `Ok(T)`: Successfully loaded and parsed configuration
/// - `Err`: File I/O or parsing error
///
/// # Example
/// ```ignore
/// let config: StegoConfig = load_config("config/stego.toml")?;
/// ```
pub fn load_config<T>(path: impl AsRef<Path>) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config: T = toml::from_str(&content)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    Ok(config)
}

/// Complete application configuration.
///
/// # Example TOML
///
/// ```toml
/// [output]
/// encoded_image_path = "encrypted_image.png"
/// rendered_text_path = "retrieved_text.png"
///
/// [render]
/// width = 800
/// height = 600
///
/// [codec]
/// framing = "terminator"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StegoConfig {
    pub output: OutputConfig,
    pub render: RenderSettings,
    pub codec: CodecConfig,
}

impl StegoConfig {
    /// Loads `path` if given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => load_config(path),
            None => Ok(Self::default()),
        }
    }
}

/// Where artifacts are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Destination of encoded images, and the image the menu decrypts.
    pub encoded_image_path: PathBuf,
    /// Destination of the rendered preview of decoded text.
    pub rendered_text_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            encoded_image_path: PathBuf::from("encrypted_image.png"),
            rendered_text_path: PathBuf::from("retrieved_text.png"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    pub framing: Framing,
}
