//! Inkpad Render Library
//!
//! CPU implementation of the engine's raster surface.
//! Rasterization uses tiny-skia; images are encoded with `png`.

mod encode;
mod skia;

pub use encode::{decode_png, encode_rgba_png};
pub use skia::SkiaRaster;

/// Ink engine drawing into CPU rasters.
pub type Engine = inkpad_core::InkEngine<SkiaRaster>;
