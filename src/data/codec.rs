//! Image codec abstraction.
//!
//! The annotation store never decodes or encodes image files itself. It is
//! handed an [`ImageCodec`] and delegates reference loading and drawing
//! export to it.

use std::path::Path;

use crate::model::{Raster, RasterView};

/// Error type for codec operations.
#[derive(Debug, Clone)]
pub struct CodecError {
    /// Human-readable error message.
    pub message: String,
    /// The codec that produced this error (if known).
    pub codec_id: Option<&'static str>,
}

impl CodecError {
    /// Create a new codec error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            codec_id: None,
        }
    }

    /// Attach codec context.
    pub fn with_codec(mut self, codec_id: &'static str) -> Self {
        self.codec_id = Some(codec_id);
        self
    }
}

impl std::fmt::Display for CodecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(codec) = self.codec_id {
            write!(f, "[{}] {}", codec, self.message)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for CodecError {}

impl From<String> for CodecError {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for CodecError {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Reads and writes RGB rasters from and to image files.
pub trait ImageCodec {
    /// Unique identifier for this codec (e.g., "image").
    fn id(&self) -> &'static str;

    /// File extensions this codec handles (lowercase, without dots).
    fn extensions(&self) -> &'static [&'static str];

    /// Decode the image at `path` into an RGB raster.
    fn decode(&self, path: &Path) -> Result<Raster, CodecError>;

    /// Encode `raster` to `path`. The file format follows the extension.
    fn encode(&self, raster: RasterView<'_>, path: &Path) -> Result<(), CodecError>;

    /// Whether `path` has an extension this codec handles.
    fn supports(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .is_some_and(|e| self.extensions().contains(&e.as_str()))
    }
}
