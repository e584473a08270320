//! Canvas state: background color plus stroke history.

use crate::codec;
use crate::color::Argb;
use crate::stroke::Stroke;

/// Everything the stroke text format persists.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasState {
    /// Background fill, drawn beneath the strokes.
    pub background_color: Argb,
    /// Committed strokes, oldest first.
    pub history: Vec<Stroke>,
}

impl Default for CanvasState {
    fn default() -> Self {
        Self::new(Argb::WHITE)
    }
}

impl CanvasState {
    /// Create an empty state with the given background.
    pub fn new(background_color: Argb) -> Self {
        Self {
            background_color,
            history: Vec::new(),
        }
    }

    /// Serialize to the stroke text format.
    pub fn to_text(&self) -> String {
        codec::encode(self.background_color, &self.history)
    }

    /// Parse the stroke text format.
    ///
    /// Malformed stroke lines are skipped. When the background line is missing
    /// or unparsable, the result is empty and carries `fallback_background`.
    pub fn from_text(text: &str, fallback_background: Argb) -> Self {
        codec::decode(text).into_state(fallback_background)
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    #[test]
    fn test_text_round_trip() {
        let state = CanvasState {
            background_color: Argb(0xFF33_6699),
            history: vec![Stroke::new(
                Argb::BLACK,
                12.0,
                vec![Point::new(10.0, 10.0), Point::new(20.0, 20.0)],
            )],
        };
        assert_eq!(CanvasState::from_text(&state.to_text(), Argb::WHITE), state);
    }

    #[test]
    fn test_from_text_background_only() {
        let state = CanvasState::from_text("16777215\n", Argb::BLACK);
        assert_eq!(state.background_color, Argb(16777215));
        assert!(state.is_empty());
    }
}
