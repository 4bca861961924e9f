//! Raw RGB pixel buffers.
//!
//! A raster is a row-major `(height, width, 3)` array of `u8`, which lets
//! sector extraction hand out zero-copy views via `ndarray` slicing.

use image::{DynamicImage, RgbImage};
use ndarray::{Array3, ArrayView3};

use crate::data::CodecError;

/// An 8-bit RGB triple.
pub type Rgb = [u8; 3];

/// Owned RGB raster, shape `(height, width, 3)`.
pub type Raster = Array3<u8>;

/// Borrowed view into a raster.
pub type RasterView<'a> = ArrayView3<'a, u8>;

/// Number of colour channels per pixel.
pub const CHANNELS: usize = 3;

/// Create a `width`×`height` raster filled with `colour`.
pub fn filled(width: usize, height: usize, colour: Rgb) -> Raster {
    Array3::from_shape_fn((height, width, CHANNELS), |(_, _, c)| colour[c])
}

/// Width in pixels.
pub fn width(raster: &RasterView<'_>) -> usize {
    raster.shape()[1]
}

/// Height in pixels.
pub fn height(raster: &RasterView<'_>) -> usize {
    raster.shape()[0]
}

/// Read one pixel.
pub fn pixel(raster: &RasterView<'_>, x: usize, y: usize) -> Rgb {
    [raster[[y, x, 0]], raster[[y, x, 1]], raster[[y, x, 2]]]
}

/// Convert a decoded image into a raster, dropping any alpha channel.
pub fn from_image(img: DynamicImage) -> Result<Raster, CodecError> {
    let rgb = img.to_rgb8();
    let (w, h) = (rgb.width() as usize, rgb.height() as usize);
    // RgbImage is row-major with interleaved channels, matching our layout.
    Array3::from_shape_vec((h, w, CHANNELS), rgb.into_raw())
        .map_err(|e| CodecError::new(format!("Decoded {}x{} image has bad layout: {}", w, h, e)))
}

/// Convert a raster into an `image` buffer for encoding.
pub fn to_image(raster: &RasterView<'_>) -> Option<RgbImage> {
    let (h, w) = (height(raster), width(raster));
    let data: Vec<u8> = raster.iter().copied().collect();
    RgbImage::from_raw(u32::try_from(w).ok()?, u32::try_from(h).ok()?, data)
}
