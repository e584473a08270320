//! Scaled snapshots of the persistent raster.

use crate::color::Argb;
use crate::surface::{RasterSurface, SurfaceError, SurfaceResult};
use kurbo::Affine;
use std::io::Write;

/// Uniform scale that fits a `src_w` x `src_h` raster within `max_w` x `max_h`.
pub fn fit_scale(src_w: u32, src_h: u32, max_w: u32, max_h: u32) -> f64 {
    let scale_x = f64::from(max_w) / f64::from(src_w);
    let scale_y = f64::from(max_h) / f64::from(src_h);
    scale_x.min(scale_y)
}

/// Target raster size for `scale`, rounded to whole pixels.
pub fn scaled_size(src_w: u32, src_h: u32, scale: f64) -> (u32, u32) {
    let width = (f64::from(src_w) * scale).round();
    let height = (f64::from(src_h) * scale).round();
    (width.clamp(0.0, f64::from(u32::MAX)) as u32, height.clamp(0.0, f64::from(u32::MAX)) as u32)
}

/// Render `source` at `scale` over a flat `background`.
pub fn render_scaled<R: RasterSurface>(source: &R, background: Argb, scale: f64) -> SurfaceResult<R> {
    let (width, height) = scaled_size(source.width(), source.height(), scale);
    if width == 0 || height == 0 {
        return Err(SurfaceError::InvalidSize { width, height });
    }
    let mut target = R::create(width, height)?;
    target.erase(background);
    target.draw_raster(source, Affine::scale(scale));
    Ok(target)
}

/// Render a thumbnail that fits within `max_w` x `max_h`.
pub fn render_thumbnail<R: RasterSurface>(source: &R, background: Argb, max_w: u32, max_h: u32) -> SurfaceResult<R> {
    if source.width() == 0 || source.height() == 0 {
        return Err(SurfaceError::InvalidSize {
            width: source.width(),
            height: source.height(),
        });
    }
    let scale = fit_scale(source.width(), source.height(), max_w, max_h);
    render_scaled(source, background, scale)
}

/// Render at full size.
pub fn render_full<R: RasterSurface>(source: &R, background: Argb) -> SurfaceResult<R> {
    render_scaled(source, background, 1.0)
}

/// Encode `raster` as PNG into `sink`.
///
/// The image is encoded completely before anything is written, so a failed
/// encode leaves the sink untouched.
pub fn write_png<R: RasterSurface, W: Write + ?Sized>(raster: &R, sink: &mut W) -> SurfaceResult<()> {
    let bytes = raster.encode_png()?;
    sink.write_all(&bytes)?;
    sink.flush()?;
    Ok(())
}
