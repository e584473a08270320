//! CPU raster surface backed by tiny-skia.

use crate::encode::encode_rgba_png;
use inkpad_core::color::Argb;
use inkpad_core::stroke::Pen;
use inkpad_core::surface::{RasterSurface, SurfaceError, SurfaceResult};
use kurbo::{Affine, BezPath, PathEl};
use tiny_skia::{
    Color, FilterQuality, LineCap, LineJoin, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke, Transform,
};

/// An RGBA raster in premultiplied 8-bit channels.
#[derive(Debug, Clone, PartialEq)]
pub struct SkiaRaster {
    pixmap: Pixmap,
}

impl SkiaRaster {
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Unpremultiplied color at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Argb> {
        let pixel = self.pixmap.pixel(x, y)?.demultiply();
        Some(Argb::from_channels(pixel.alpha(), pixel.red(), pixel.green(), pixel.blue()))
    }

    /// Whether every pixel has zero alpha.
    pub fn is_transparent(&self) -> bool {
        self.pixmap.pixels().iter().all(|p| p.alpha() == 0)
    }

    /// Unpremultiplied RGBA bytes, row by row.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect()
    }
}

fn skia_color(color: Argb) -> Color {
    Color::from_rgba8(color.red(), color.green(), color.blue(), color.alpha())
}

fn skia_transform(affine: Affine) -> Transform {
    let [a, b, c, d, e, f] = affine.as_coeffs();
    Transform::from_row(a as f32, b as f32, c as f32, d as f32, e as f32, f as f32)
}

/// Convert a kurbo path; `None` if it has nothing to draw.
fn skia_path(path: &BezPath) -> Option<tiny_skia::Path> {
    let mut builder = PathBuilder::new();
    for element in path.elements() {
        match *element {
            PathEl::MoveTo(p) => builder.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => builder.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(p1, p2) => builder.quad_to(p1.x as f32, p1.y as f32, p2.x as f32, p2.y as f32),
            PathEl::CurveTo(p1, p2, p3) => builder.cubic_to(
                p1.x as f32,
                p1.y as f32,
                p2.x as f32,
                p2.y as f32,
                p3.x as f32,
                p3.y as f32,
            ),
            PathEl::ClosePath => builder.close(),
        }
    }
    builder.finish()
}

impl RasterSurface for SkiaRaster {
    fn create(width: u32, height: u32) -> SurfaceResult<Self> {
        let pixmap = Pixmap::new(width, height).ok_or(SurfaceError::InvalidSize { width, height })?;
        Ok(Self { pixmap })
    }

    fn width(&self) -> u32 {
        self.pixmap.width()
    }

    fn height(&self) -> u32 {
        self.pixmap.height()
    }

    fn erase(&mut self, color: Argb) {
        self.pixmap.fill(skia_color(color));
    }

    fn stroke_path(&mut self, path: &BezPath, pen: &Pen) {
        let Some(path) = skia_path(path) else {
            log::debug!("skipping empty path");
            return;
        };

        let mut paint = Paint::default();
        paint.set_color(skia_color(pen.color));
        paint.anti_alias = true;

        let stroke = Stroke {
            width: pen.width as f32,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Stroke::default()
        };

        self.pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    fn draw_raster(&mut self, source: &Self, transform: Affine) {
        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..PixmapPaint::default()
        };
        self.pixmap
            .draw_pixmap(0, 0, source.pixmap.as_ref(), &paint, skia_transform(transform), None);
    }

    fn encode_png(&self) -> SurfaceResult<Vec<u8>> {
        encode_rgba_png(&self.to_rgba8(), self.width(), self.height())
    }
}
