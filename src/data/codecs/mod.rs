//! Built-in image codecs.
//!
//! This module contains implementations of the `ImageCodec` trait.

mod image_codec;

pub use image_codec::StandardImageCodec;
