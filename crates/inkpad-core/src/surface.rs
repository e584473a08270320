//! Rendering surface abstraction.
//!
//! The engine never talks to a graphics API directly. A host supplies a raster
//! type implementing [`RasterSurface`]; the default CPU implementation lives in
//! the `inkpad-render` crate.

use crate::color::Argb;
use crate::stroke::Pen;
use kurbo::{Affine, BezPath};
use thiserror::Error;

/// Surface errors.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("Invalid raster size: {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
    #[error("No raster: surface size is not known yet")]
    NoRaster,
    #[error("Encoding failed: {0}")]
    Encode(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for surface operations.
pub type SurfaceResult<T> = Result<T, SurfaceError>;

/// A mutable raster the engine can draw into.
///
/// Strokes are drawn antialiased with round joins and caps.
pub trait RasterSurface: Sized {
    /// Create a fully transparent raster.
    fn create(width: u32, height: u32) -> SurfaceResult<Self>;

    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Overwrite every pixel with `color`.
    fn erase(&mut self, color: Argb);

    /// Stroke `path` with `pen`.
    fn stroke_path(&mut self, path: &BezPath, pen: &Pen);

    /// Draw `source` on top of this raster through `transform`, resampling smoothly.
    fn draw_raster(&mut self, source: &Self, transform: Affine);

    /// Encode losslessly as PNG, alpha preserved.
    fn encode_png(&self) -> SurfaceResult<Vec<u8>>;
}
