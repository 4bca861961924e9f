//! Image file I/O for reference rasters and exported drawings.
//!
//! This module provides:
//! - `ImageCodec`: the decode/encode contract the annotation store relies on
//! - `StandardImageCodec`: PNG, JPEG, BMP, TIFF and WebP via the `image` crate
//!
//! ## Adding New Codecs
//!
//! Implement `ImageCodec` and hand the codec to
//! `AnnotationStore::with_codec`.
//!
//! ```rust,ignore
//! use poprev::data::{CodecError, ImageCodec};
//! use poprev::model::{Raster, RasterView};
//!
//! pub struct MyCodec;
//!
//! impl ImageCodec for MyCodec {
//!     fn id(&self) -> &'static str { "mine" }
//!     fn extensions(&self) -> &'static [&'static str] { &["mine"] }
//!     fn decode(&self, path: &Path) -> Result<Raster, CodecError> { /* ... */ }
//!     fn encode(&self, raster: RasterView<'_>, path: &Path) -> Result<(), CodecError> { /* ... */ }
//! }
//! ```

mod codec;
pub mod codecs;

pub use codec::{CodecError, ImageCodec};
pub use codecs::StandardImageCodec;
