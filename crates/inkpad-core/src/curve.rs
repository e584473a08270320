//! Midpoint quadratic smoothing.
//!
//! Live capture and replay build curves with the same three steps, so a
//! stroke restored from text renders exactly like it did while drawn:
//!
//! - the first sample starts the path and adds a one-unit nub to the right,
//!   so a tap leaves a visible dot;
//! - every accepted sample after it adds a quadratic segment whose control
//!   point is the previous sample and whose end is the midpoint between the
//!   previous sample and the new one;
//! - the lift sample ends the path with a straight line to its exact position.

use kurbo::{BezPath, Point};

/// Start a curve at `start`, including the tap nub.
pub fn begin(start: Point) -> BezPath {
    let mut path = BezPath::new();
    path.move_to(start);
    path.line_to(Point::new(start.x + 1.0, start.y));
    path
}

/// Extend `path` towards `next`, using `previous` as the control point.
pub fn smooth_to(path: &mut BezPath, previous: Point, next: Point) {
    path.quad_to(previous, previous.midpoint(next));
}

/// Terminate `path` precisely at `end`.
pub fn finish(path: &mut BezPath, end: Point) {
    path.line_to(end);
}

/// Rebuild the curve of a committed stroke from its stored points.
pub fn from_points(points: &[Point]) -> BezPath {
    let Some((&first, rest)) = points.split_first() else {
        return BezPath::new();
    };

    let mut path = begin(first);
    let Some((&last, interior)) = rest.split_last() else {
        return path;
    };

    let mut previous = first;
    for &point in interior {
        smooth_to(&mut path, previous, point);
        previous = point;
    }
    finish(&mut path, last);
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::PathEl;

    #[test]
    fn test_begin_adds_nub() {
        let path = begin(Point::new(5.0, 5.0));
        assert_eq!(
            path.elements(),
            &[
                PathEl::MoveTo(Point::new(5.0, 5.0)),
                PathEl::LineTo(Point::new(6.0, 5.0)),
            ]
        );
    }

    #[test]
    fn test_smooth_to_ends_at_midpoint() {
        let mut path = begin(Point::ZERO);
        smooth_to(&mut path, Point::ZERO, Point::new(10.0, 4.0));
        assert_eq!(
            path.elements().last(),
            Some(&PathEl::QuadTo(Point::ZERO, Point::new(5.0, 2.0)))
        );
    }

    #[test]
    fn test_from_points_single_point_is_nub() {
        let path = from_points(&[Point::new(3.0, 4.0)]);
        assert_eq!(path.elements().len(), 2);
    }

    #[test]
    fn test_from_points_empty() {
        assert!(from_points(&[]).elements().is_empty());
    }

    #[test]
    fn test_from_points_matches_live_capture() {
        let samples = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(20.0, 10.0),
            Point::new(25.0, 12.0),
        ];

        let mut live = begin(samples[0]);
        smooth_to(&mut live, samples[0], samples[1]);
        smooth_to(&mut live, samples[1], samples[2]);
        finish(&mut live, samples[3]);

        assert_eq!(from_points(&samples).elements(), live.elements());
    }

    #[test]
    fn test_from_points_ends_with_line_to_last() {
        let path = from_points(&[Point::new(0.0, 0.0), Point::new(20.0, 20.0)]);
        assert_eq!(
            path.elements().last(),
            Some(&PathEl::LineTo(Point::new(20.0, 20.0)))
        );
    }
}
