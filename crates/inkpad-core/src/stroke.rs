//! Committed strokes and the pen that draws them.

use crate::color::Argb;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Default pen width in surface units.
pub const DEFAULT_PEN_WIDTH: f64 = 12.0;

/// Paint used for live and committed strokes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pen {
    /// Stroke color.
    pub color: Argb,
    /// Stroke width, always positive.
    pub width: f64,
}

impl Pen {
    pub fn new(color: Argb, width: f64) -> Self {
        Self { color, width }
    }
}

impl Default for Pen {
    fn default() -> Self {
        Self::new(Argb::BLACK, DEFAULT_PEN_WIDTH)
    }
}

/// One committed, immutable stroke.
///
/// `points` holds exactly the samples the tracker accepted, in capture order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    color: Argb,
    width: f64,
    points: Vec<Point>,
}

impl Stroke {
    /// Create a stroke. Callers guarantee at least one point.
    pub fn new(color: Argb, width: f64, points: Vec<Point>) -> Self {
        debug_assert!(!points.is_empty(), "a stroke needs at least one point");
        Self { color, width, points }
    }

    pub fn color(&self) -> Argb {
        self.color
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The paint this stroke was committed with.
    pub fn pen(&self) -> Pen {
        Pen::new(self.color, self.width)
    }
}
