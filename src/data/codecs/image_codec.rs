//! Codec for standard image formats (PNG, JPEG, BMP, TIFF, WebP).
//!
//! Decoding drops alpha; encoding writes 8-bit RGB.

use std::path::Path;

use crate::data::codec::{CodecError, ImageCodec};
use crate::model::raster;
use crate::model::{Raster, RasterView};

/// Codec backed by the `image` crate.
///
/// The output format is inferred from the destination file extension.
pub struct StandardImageCodec;

impl ImageCodec for StandardImageCodec {
    fn id(&self) -> &'static str {
        "image"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["png", "jpg", "jpeg", "bmp", "tiff", "tif", "webp"]
    }

    fn decode(&self, path: &Path) -> Result<Raster, CodecError> {
        let img = image::open(path).map_err(|e| {
            CodecError::new(format!("Failed to decode {:?}: {}", path, e)).with_codec(self.id())
        })?;

        let raster = raster::from_image(img).map_err(|e| e.with_codec(self.id()))?;
        log::trace!(
            "StandardImageCodec: decoded {}x{} image from {:?}",
            raster::width(&raster.view()),
            raster::height(&raster.view()),
            path
        );
        Ok(raster)
    }

    fn encode(&self, raster: RasterView<'_>, path: &Path) -> Result<(), CodecError> {
        let img = raster::to_image(&raster).ok_or_else(|| {
            CodecError::new("Raster dimensions exceed image limits").with_codec(self.id())
        })?;

        img.save(path).map_err(|e| {
            CodecError::new(format!("Failed to encode {:?}: {}", path, e)).with_codec(self.id())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::raster::{filled, pixel};

    #[test]
    fn test_codec_metadata() {
        let codec = StandardImageCodec;
        assert_eq!(codec.id(), "image");
        assert!(codec.supports(Path::new("ref.PNG")));
        assert!(codec.supports(Path::new("ref.jpeg")));
        assert!(!codec.supports(Path::new("drawing.poprev")));
        assert!(!codec.supports(Path::new("no_extension")));
    }

    #[test]
    fn test_png_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");

        let mut raster = filled(5, 3, [0x55, 0x55, 0x55]);
        raster[[2, 4, 0]] = 255;

        let codec = StandardImageCodec;
        codec.encode(raster.view(), &path).unwrap();
        let decoded = codec.decode(&path).unwrap();

        assert_eq!(decoded.shape(), &[3, 5, 3]);
        assert_eq!(pixel(&decoded.view(), 4, 2), [255, 0x55, 0x55]);
        assert_eq!(decoded, raster);
    }

    #[test]
    fn test_decode_garbage_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.png");
        std::fs::write(&path, b"not an image").unwrap();

        let err = StandardImageCodec.decode(&path).unwrap_err();
        assert_eq!(err.codec_id, Some("image"));
    }

    #[test]
    fn test_encode_unknown_extension_fails() {
        let dir = tempfile::tempdir().unwrap();
        let raster = filled(2, 2, [0, 0, 0]);
        assert!(
            StandardImageCodec
                .encode(raster.view(), &dir.path().join("out.unknownext"))
                .is_err()
        );
    }
}
