//! Ordered store of committed strokes.

use crate::stroke::Stroke;

/// Committed strokes, oldest first.
///
/// Append-only while drawing; replaced wholesale on restore and emptied on clear.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    strokes: Vec<Stroke>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a newly committed stroke.
    pub fn push(&mut self, stroke: Stroke) {
        self.strokes.push(stroke);
    }

    /// Replace every stroke at once.
    pub fn replace(&mut self, strokes: Vec<Stroke>) {
        self.strokes = strokes;
    }

    pub fn clear(&mut self) {
        self.strokes.clear();
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn iter(&self) -> impl Iterator<Item = &Stroke> {
        self.strokes.iter()
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }
}

impl From<Vec<Stroke>> for History {
    fn from(strokes: Vec<Stroke>) -> Self {
        Self { strokes }
    }
}
