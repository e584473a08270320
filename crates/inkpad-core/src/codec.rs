//! Stroke text format.
//!
//! ```text
//! <background color>
//! <color>,<width>,<x1>,<y1>,...,<xk>,<yk>
//! ...
//! ```
//!
//! Colors are signed decimal packed ARGB, width and coordinates are decimal
//! floats. Every line, the last included, ends with `\n`. Decoding never fails
//! as a whole: a malformed stroke line is logged and skipped.

use crate::canvas::CanvasState;
use crate::color::Argb;
use crate::stroke::Stroke;
use kurbo::Point;
use std::fmt::Write as _;
use thiserror::Error;

/// Why a stroke line was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LineError {
    #[error("expected at least 2 tokens, found {0}")]
    TooFewTokens(usize),
    #[error("stroke has no coordinates")]
    NoCoordinates,
    #[error("odd number of coordinates ({0})")]
    OddCoordinates(usize),
    #[error("invalid color: {0:?}")]
    InvalidColor(String),
    #[error("invalid width: {0:?}")]
    InvalidWidth(String),
    #[error("invalid coordinate: {0:?}")]
    InvalidCoordinate(String),
}

/// A stroke line that could not be decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedLine {
    /// 1-based line number in the input (the background is line 1).
    pub line: usize,
    pub error: LineError,
}

/// Result of decoding a stroke document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Decoded {
    /// `None` when the background line is missing or unparsable.
    pub background: Option<Argb>,
    /// Well-formed strokes in document order.
    pub strokes: Vec<Stroke>,
    /// Lines that were skipped.
    pub rejected: Vec<RejectedLine>,
}

impl Decoded {
    /// Turn the decode result into a canvas state.
    pub fn into_state(self, fallback_background: Argb) -> CanvasState {
        CanvasState {
            background_color: self.background.unwrap_or(fallback_background),
            history: self.strokes,
        }
    }
}

/// Encode a background color and strokes, oldest first.
pub fn encode(background: Argb, strokes: &[Stroke]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", background.to_signed());
    for stroke in strokes {
        encode_stroke(&mut out, stroke);
        out.push('\n');
    }
    out
}

fn encode_stroke(out: &mut String, stroke: &Stroke) {
    // `{:?}` keeps a fractional part on whole numbers ("12.0") and round-trips exactly.
    let _ = write!(out, "{},{:?}", stroke.color().to_signed(), stroke.width());
    for point in stroke.points() {
        let _ = write!(out, ",{:?},{:?}", point.x, point.y);
    }
}

/// Decode a stroke document.
pub fn decode(input: &str) -> Decoded {
    let Some((head, body)) = input.split_once('\n') else {
        // No stroke section at all: background-only or nothing.
        return Decoded {
            background: Argb::parse(input),
            ..Decoded::default()
        };
    };

    let Some(background) = Argb::parse(head) else {
        log::error!("invalid background color line: {head:?}");
        return Decoded::default();
    };

    let mut decoded = Decoded {
        background: Some(background),
        ..Decoded::default()
    };

    for (index, line) in body.split('\n').enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match decode_stroke(line) {
            Ok(stroke) => decoded.strokes.push(stroke),
            Err(error) => {
                log::error!("invalid stroke string: {line} ({error})");
                decoded.rejected.push(RejectedLine {
                    line: index + 2,
                    error,
                });
            }
        }
    }

    decoded
}

/// Decode a single `color,width,x1,y1,...` line.
pub fn decode_stroke(line: &str) -> Result<Stroke, LineError> {
    // Consecutive commas collapse, as with a classic string tokenizer.
    let tokens: Vec<&str> = line.split(',').map(str::trim).filter(|t| !t.is_empty()).collect();
    if tokens.len() < 2 {
        return Err(LineError::TooFewTokens(tokens.len()));
    }

    let coordinates = &tokens[2..];
    if coordinates.is_empty() {
        return Err(LineError::NoCoordinates);
    }
    if coordinates.len() % 2 == 1 {
        return Err(LineError::OddCoordinates(coordinates.len()));
    }

    let color = Argb::parse(tokens[0]).ok_or_else(|| LineError::InvalidColor(tokens[0].to_string()))?;
    let width = tokens[1]
        .parse::<f64>()
        .ok()
        .filter(|w| w.is_finite() && *w > 0.0)
        .ok_or_else(|| LineError::InvalidWidth(tokens[1].to_string()))?;

    let points = coordinates
        .chunks_exact(2)
        .map(|pair| Ok(Point::new(parse_coordinate(pair[0])?, parse_coordinate(pair[1])?)))
        .collect::<Result<Vec<_>, LineError>>()?;

    Ok(Stroke::new(color, width, points))
}

fn parse_coordinate(token: &str) -> Result<f64, LineError> {
    token
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| LineError::InvalidCoordinate(token.to_string()))
}
