//! Decoded tiles and the pixel-transform pipeline.
//!
//! A [`RawTile`] is one decoded, in-memory pixel buffer owned exclusively by
//! a single in-flight request. The [`transform`] module mutates tiles by
//! swapping in freshly built buffers, keeping the shape/encoding metadata
//! consistent at every step.

pub mod raw;
pub mod transform;

pub use raw::{PixelBuffer, RawTile, SampleFormat};
pub use transform::{
    adjust_contrast, adjust_gamma, apply_colormap, convert_lab_to_srgb, crop, hillshade, invert,
    normalize, resample, rotate, to_greyscale, ColormapKind, ResampleMethod,
};
