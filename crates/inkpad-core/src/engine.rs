//! The ink capture engine.
//!
//! Pointer samples flow into the [`PointerTracker`]; pointer-up commits a
//! [`Stroke`] to the [`History`] and bakes the live curve into the persistent
//! raster. The engine is single-threaded and does no locking; the host
//! serializes calls.

use crate::canvas::CanvasState;
use crate::codec::{self, RejectedLine};
use crate::color::Argb;
use crate::compositor::Compositor;
use crate::config::EngineConfig;
use crate::export;
use crate::history::History;
use crate::input::PointerEvent;
use crate::pointer::{MoveOutcome, PointerId, PointerTracker};
use crate::storage::{SavedDrawing, Storage, StorageResult};
use crate::stroke::{Pen, Stroke};
use crate::surface::{RasterSurface, SurfaceError, SurfaceResult};
use kurbo::Point;
use std::io::Write;

/// Summary of a [`InkEngine::restore`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestoreReport {
    /// Strokes now in history.
    pub restored: usize,
    /// Whether the background line was usable.
    pub background_restored: bool,
    /// Stroke lines that were skipped.
    pub rejected: Vec<RejectedLine>,
}

/// Ink capture engine over a raster type `R`.
#[derive(Debug)]
pub struct InkEngine<R> {
    config: EngineConfig,
    tracker: PointerTracker,
    history: History,
    compositor: Compositor<R>,
    background: Argb,
    pen: Pen,
}

impl<R: RasterSurface> Default for InkEngine<R> {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl<R: RasterSurface> InkEngine<R> {
    /// Create an engine; the raster is created by [`set_surface_size`](Self::set_surface_size).
    ///
    /// Out-of-range config values are replaced by their defaults (see [`EngineConfig::sanitized`]).
    pub fn new(config: EngineConfig) -> Self {
        let config = config.sanitized();
        Self {
            tracker: PointerTracker::new(config.max_pointers, config.touch_tolerance),
            history: History::new(),
            compositor: Compositor::new(),
            background: config.background_color,
            pen: config.pen(),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Report the drawing surface size.
    ///
    /// The first positive size creates the persistent raster and replays the
    /// history into it. Later sizes are ignored.
    pub fn set_surface_size(&mut self, width: u32, height: u32) -> SurfaceResult<bool> {
        self.compositor.ensure_raster(width, height, self.history.strokes())
    }

    // --- pen and background ---

    pub fn pen(&self) -> Pen {
        self.pen
    }

    /// Color for live strokes and the next committed stroke.
    pub fn set_pen_color(&mut self, color: Argb) {
        self.pen.color = color;
    }

    /// Width for live strokes and the next committed stroke.
    ///
    /// Returns false and keeps the current width if `width` is not a positive number.
    pub fn set_pen_width(&mut self, width: f64) -> bool {
        if !(width.is_finite() && width > 0.0) {
            log::warn!("ignoring invalid pen width {width}");
            return false;
        }
        self.pen.width = width;
        true
    }

    pub fn background_color(&self) -> Argb {
        self.background
    }

    pub fn set_background_color(&mut self, color: Argb) {
        self.background = color;
    }

    // --- pointer input ---

    /// Start a stroke for `id`.
    pub fn on_pointer_down(&mut self, id: PointerId, x: f64, y: f64) -> bool {
        self.tracker.down(id, Point::new(x, y))
    }

    /// Feed one move sample for `id`.
    pub fn on_pointer_move(&mut self, id: PointerId, x: f64, y: f64) -> MoveOutcome {
        self.tracker.move_to(id, Point::new(x, y))
    }

    /// Feed a motion batch: `history` oldest first, then `current`.
    ///
    /// Returns the number of accepted samples.
    pub fn on_pointer_moves(&mut self, id: PointerId, history: &[Point], current: Point) -> usize {
        self.feed_moves(id, history.iter().copied().chain(std::iter::once(current)))
    }

    fn feed_moves(&mut self, id: PointerId, samples: impl IntoIterator<Item = Point>) -> usize {
        samples
            .into_iter()
            .filter(|&p| self.tracker.move_to(id, p) == MoveOutcome::Accepted)
            .count()
    }

    /// Finish the stroke for `id`, commit it and bake it into the raster.
    ///
    /// Returns the committed stroke, or `None` if `id` had no session.
    pub fn on_pointer_up(&mut self, id: PointerId, x: f64, y: f64) -> Option<&Stroke> {
        let finished = self.tracker.up(id, Point::new(x, y))?;
        self.compositor.bake(&finished.curve, &self.pen);
        self.history.push(Stroke::new(self.pen.color, self.pen.width, finished.points));
        self.history.strokes().last()
    }

    /// Dispatch a host event.
    pub fn handle_event(&mut self, event: &PointerEvent) {
        match event {
            PointerEvent::Down { id, position } => {
                self.on_pointer_down(*id, position.x, position.y);
            }
            PointerEvent::Move { id, .. } => {
                self.feed_moves(*id, event.samples());
            }
            PointerEvent::Up { id, position } => {
                self.on_pointer_up(*id, position.x, position.y);
            }
        }
    }

    /// Number of pointers currently drawing.
    pub fn active_pointers(&self) -> usize {
        self.tracker.active_count()
    }

    pub fn tracker(&self) -> &PointerTracker {
        &self.tracker
    }

    // --- raster ---

    /// The persistent raster, once the surface size is known.
    pub fn raster(&self) -> Option<&R> {
        self.compositor.raster()
    }

    /// Draw committed strokes and every live curve onto `frame`.
    pub fn compose(&self, frame: &mut R) {
        let live = self.tracker.active().map(|(_, session)| session.curve());
        self.compositor.compose(frame, live, &self.pen);
    }

    /// Erase everything: raster, history and in-progress strokes.
    pub fn clear(&mut self) {
        self.compositor.clear();
        self.history.clear();
        self.tracker.clear();
    }

    // --- state ---

    /// Committed strokes, oldest first.
    pub fn history(&self) -> &[Stroke] {
        self.history.strokes()
    }

    /// Snapshot of the persisted state.
    pub fn state(&self) -> CanvasState {
        CanvasState {
            background_color: self.background,
            history: self.history.strokes().to_vec(),
        }
    }

    /// Serialize background and history to the stroke text format.
    pub fn stroke_string(&self) -> String {
        codec::encode(self.background, self.history.strokes())
    }

    /// Replace the current drawing with one decoded from `text`.
    ///
    /// Everything is cleared first. Malformed stroke lines are skipped; if the
    /// background line is unusable the current background is kept and the
    /// drawing stays empty.
    pub fn restore(&mut self, text: &str) -> RestoreReport {
        self.clear();
        let decoded = codec::decode(text);

        let background_restored = decoded.background.is_some();
        if let Some(background) = decoded.background {
            self.background = background;
        }
        let report = RestoreReport {
            restored: decoded.strokes.len(),
            background_restored,
            rejected: decoded.rejected,
        };

        self.history.replace(decoded.strokes);
        self.compositor.replay(self.history.strokes());
        log::info!(
            "restored {} strokes ({} rejected)",
            report.restored,
            report.rejected.len()
        );
        report
    }

    /// Load state directly, e.g. from a saved [`CanvasState`].
    pub fn load_state(&mut self, state: CanvasState) {
        self.clear();
        self.background = state.background_color;
        self.history.replace(state.history);
        self.compositor.replay(self.history.strokes());
    }

    // --- export ---

    fn source(&self) -> SurfaceResult<&R> {
        self.compositor.raster().ok_or(SurfaceError::NoRaster)
    }

    /// Snapshot fitted within `max_w` x `max_h`, over the background.
    pub fn render_thumbnail(&self, max_w: u32, max_h: u32) -> SurfaceResult<R> {
        export::render_thumbnail(self.source()?, self.background, max_w, max_h)
    }

    /// Full-size snapshot over the background.
    pub fn render_full(&self) -> SurfaceResult<R> {
        export::render_full(self.source()?, self.background)
    }

    /// Encode a thumbnail as PNG into `sink`.
    pub fn write_thumbnail_png<W: Write + ?Sized>(&self, max_w: u32, max_h: u32, sink: &mut W) -> SurfaceResult<()> {
        let thumbnail = self.render_thumbnail(max_w, max_h)?;
        export::write_png(&thumbnail, sink)
    }

    /// Encode a full-size image as PNG into `sink`.
    pub fn write_png<W: Write + ?Sized>(&self, sink: &mut W) -> SurfaceResult<()> {
        let image = self.render_full()?;
        export::write_png(&image, sink)
    }

    // --- storage ---

    /// Save the stroke text plus a thumbnail sized by the config.
    pub fn save<S: Storage + ?Sized>(&self, storage: &S) -> StorageResult<SavedDrawing> {
        let (max_w, max_h) = self.config.thumbnail_bounds();
        let mut thumbnail = Vec::new();
        if let Err(e) = self.write_thumbnail_png(max_w, max_h, &mut thumbnail) {
            log::error!("failed to create thumbnail: {e}");
            return Err(e.into());
        }
        storage.save_drawing(&self.stroke_string(), &thumbnail).inspect_err(|e| {
            log::error!("failed to save drawing: {e}");
        })
    }

    /// Save a full-size PNG and return its key.
    pub fn export_image<S: Storage + ?Sized>(&self, storage: &S) -> StorageResult<String> {
        let mut png = Vec::new();
        if let Err(e) = self.write_png(&mut png) {
            log::error!("failed to create image: {e}");
            return Err(e.into());
        }
        storage.save_image(&png).inspect_err(|e| {
            log::error!("failed to save image: {e}");
        })
    }

    /// Restore a drawing saved under `stroke_key`.
    pub fn load<S: Storage + ?Sized>(&mut self, storage: &S, stroke_key: &str) -> StorageResult<RestoreReport> {
        let text = storage.load_strokes(stroke_key).inspect_err(|e| {
            log::error!("failed to read stroke file {stroke_key}: {e}");
        })?;
        Ok(self.restore(&text))
    }
}
