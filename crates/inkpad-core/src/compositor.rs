//! Persistent raster of committed strokes.

use crate::color::Argb;
use crate::curve;
use crate::stroke::{Pen, Stroke};
use crate::surface::{RasterSurface, SurfaceResult};
use kurbo::{Affine, BezPath};

/// Owns the persistent raster and composites live curves over it.
///
/// The raster is created lazily once the surface size is known and is never
/// resized afterwards.
#[derive(Debug)]
pub struct Compositor<R> {
    raster: Option<R>,
}

impl<R> Default for Compositor<R> {
    fn default() -> Self {
        Self { raster: None }
    }
}

impl<R: RasterSurface> Compositor<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the raster for a `width` x `height` surface and replay `history` into it.
    ///
    /// Returns false if the size is not positive or a raster already exists.
    pub fn ensure_raster(&mut self, width: u32, height: u32, history: &[Stroke]) -> SurfaceResult<bool> {
        if width == 0 || height == 0 || self.raster.is_some() {
            return Ok(false);
        }
        let raster = R::create(width, height)?;
        log::info!("created persistent raster {width}x{height}");
        self.raster = Some(raster);
        self.replay(history);
        Ok(true)
    }

    /// The persistent raster, once created.
    pub fn raster(&self) -> Option<&R> {
        self.raster.as_ref()
    }

    /// Rasterize `curve` into the persistent raster.
    pub fn bake(&mut self, curve: &BezPath, pen: &Pen) {
        match self.raster.as_mut() {
            Some(raster) => raster.stroke_path(curve, pen),
            None => log::debug!("no persistent raster yet; stroke kept in history only"),
        }
    }

    /// Draw the persistent raster, then each live curve on top in the given order.
    pub fn compose<'a>(&self, frame: &mut R, live: impl IntoIterator<Item = &'a BezPath>, pen: &Pen) {
        if let Some(raster) = &self.raster {
            frame.draw_raster(raster, Affine::IDENTITY);
        }
        for curve in live {
            frame.stroke_path(curve, pen);
        }
    }

    /// Erase the persistent raster to fully transparent.
    pub fn clear(&mut self) {
        if let Some(raster) = self.raster.as_mut() {
            raster.erase(Argb::TRANSPARENT);
        }
    }

    /// Erase, then redraw every stroke of `history` with the capture smoothing rule.
    pub fn replay(&mut self, history: &[Stroke]) {
        let Some(raster) = self.raster.as_mut() else {
            return;
        };
        raster.erase(Argb::TRANSPARENT);
        for stroke in history {
            raster.stroke_path(&curve::from_points(stroke.points()), &stroke.pen());
        }
        log::debug!("replayed {} strokes", history.len());
    }
}
