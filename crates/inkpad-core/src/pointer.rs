//! Per-pointer live path tracking.
//!
//! Each pointer id owns one slot. A slot is `Active` between pointer-down and
//! pointer-up and holds the smoothed live curve plus the samples accepted by
//! the tolerance filter. Slots never interact with each other.

use crate::curve;
use kurbo::{BezPath, Point};

/// Number of pointer slots.
pub const MAX_POINTERS: usize = 20;

/// Samples closer than this on both axes to the last accepted sample are dropped.
pub const TOUCH_TOLERANCE: f64 = 2.0;

/// Host-assigned pointer identifier.
pub type PointerId = usize;

/// In-progress stroke for one pointer.
#[derive(Debug, Clone)]
pub struct PointerSession {
    /// Smoothed path drawn so far.
    curve: BezPath,
    /// Accepted samples, first one included.
    points: Vec<Point>,
}

impl PointerSession {
    fn start(position: Point) -> Self {
        Self {
            curve: curve::begin(position),
            points: vec![position],
        }
    }

    pub fn curve(&self) -> &BezPath {
        &self.curve
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of accepted samples.
    pub fn accepted_count(&self) -> usize {
        self.points.len()
    }

    fn last_accepted(&self) -> Point {
        // `start` always pushes the first sample.
        self.points[self.points.len() - 1]
    }
}

/// State of a pointer slot.
#[derive(Debug, Clone, Default)]
pub enum PointerSlot {
    /// No stroke in progress.
    #[default]
    Idle,
    /// A stroke is being drawn.
    Active(PointerSession),
}

/// A session closed by pointer-up, ready to be committed.
#[derive(Debug, Clone)]
pub struct FinishedPath {
    pub id: PointerId,
    /// Live curve terminated at the lift point.
    pub curve: BezPath,
    /// Every accepted sample, lift point included.
    pub points: Vec<Point>,
}

/// Outcome of a move sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The sample extended the curve.
    Accepted,
    /// The sample was within tolerance of the last accepted one.
    Filtered,
    /// No session exists for this pointer.
    NoSession,
}

/// Bounded arena of pointer slots indexed by pointer id.
#[derive(Debug, Clone)]
pub struct PointerTracker {
    slots: Vec<PointerSlot>,
    tolerance: f64,
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new(MAX_POINTERS, TOUCH_TOLERANCE)
    }
}

impl PointerTracker {
    /// Create a tracker with `max_pointers` slots.
    pub fn new(max_pointers: usize, tolerance: f64) -> Self {
        Self {
            slots: vec![PointerSlot::Idle; max_pointers],
            tolerance,
        }
    }

    /// Number of slots; ids at or above this are ignored.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Start (or restart) the session for `id`.
    ///
    /// Returns false when `id` is out of range; nothing is mutated then.
    pub fn down(&mut self, id: PointerId, position: Point) -> bool {
        let Some(slot) = self.slots.get_mut(id) else {
            log::info!("too many pointers (pointer id = {id})");
            return false;
        };
        *slot = PointerSlot::Active(PointerSession::start(position));
        true
    }

    /// Feed one move sample for `id`.
    pub fn move_to(&mut self, id: PointerId, position: Point) -> MoveOutcome {
        let tolerance = self.tolerance;
        let session = match self.slots.get_mut(id) {
            Some(PointerSlot::Active(session)) => session,
            Some(PointerSlot::Idle) => return MoveOutcome::NoSession,
            None => {
                log::info!("too many pointers (pointer id = {id})");
                return MoveOutcome::NoSession;
            }
        };

        let previous = session.last_accepted();
        if (position.x - previous.x).abs() < tolerance && (position.y - previous.y).abs() < tolerance {
            return MoveOutcome::Filtered;
        }

        curve::smooth_to(&mut session.curve, previous, position);
        session.points.push(position);
        MoveOutcome::Accepted
    }

    /// Close the session for `id` at `position`.
    ///
    /// The slot returns to idle; `None` means there was no session.
    pub fn up(&mut self, id: PointerId, position: Point) -> Option<FinishedPath> {
        let Some(slot) = self.slots.get_mut(id) else {
            log::info!("too many pointers (pointer id = {id})");
            return None;
        };

        match std::mem::take(slot) {
            PointerSlot::Idle => None,
            PointerSlot::Active(mut session) => {
                curve::finish(&mut session.curve, position);
                session.points.push(position);
                Some(FinishedPath {
                    id,
                    curve: session.curve,
                    points: session.points,
                })
            }
        }
    }

    /// Session for `id`, if one is active.
    pub fn session(&self, id: PointerId) -> Option<&PointerSession> {
        match self.slots.get(id) {
            Some(PointerSlot::Active(session)) => Some(session),
            _ => None,
        }
    }

    pub fn is_active(&self, id: PointerId) -> bool {
        self.session(id).is_some()
    }

    /// Active sessions in pointer-id order.
    pub fn active(&self) -> impl Iterator<Item = (PointerId, &PointerSession)> {
        self.slots.iter().enumerate().filter_map(|(id, slot)| match slot {
            PointerSlot::Active(session) => Some((id, session)),
            PointerSlot::Idle => None,
        })
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    /// Discard every in-progress session.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = PointerSlot::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::PathEl;

    #[test]
    fn test_tap_produces_two_points() {
        let mut tracker = PointerTracker::default();
        assert!(tracker.down(0, Point::new(5.0, 5.0)));
        let finished = tracker.up(0, Point::new(5.0, 5.0)).unwrap();

        assert_eq!(finished.points, vec![Point::new(5.0, 5.0), Point::new(5.0, 5.0)]);
        assert!(!tracker.is_active(0));
    }

    #[test]
    fn test_move_below_tolerance_is_filtered() {
        let mut tracker = PointerTracker::default();
        tracker.down(0, Point::ZERO);
        let before = tracker.session(0).unwrap().curve().elements().len();

        assert_eq!(tracker.move_to(0, Point::new(0.5, 0.5)), MoveOutcome::Filtered);
        assert_eq!(tracker.move_to(0, Point::new(1.9, -1.9)), MoveOutcome::Filtered);

        let session = tracker.session(0).unwrap();
        assert_eq!(session.accepted_count(), 1);
        assert_eq!(session.curve().elements().len(), before);

        let finished = tracker.up(0, Point::ZERO).unwrap();
        assert_eq!(finished.points.len(), 2);
    }

    #[test]
    fn test_tolerance_compares_with_last_accepted_sample() {
        let mut tracker = PointerTracker::default();
        tracker.down(0, Point::ZERO);

        // Each step is below tolerance relative to the previous raw sample,
        // but the third one is far enough from the last accepted sample.
        assert_eq!(tracker.move_to(0, Point::new(1.0, 0.0)), MoveOutcome::Filtered);
        assert_eq!(tracker.move_to(0, Point::new(1.5, 0.0)), MoveOutcome::Filtered);
        assert_eq!(tracker.move_to(0, Point::new(2.5, 0.0)), MoveOutcome::Accepted);
        assert_eq!(tracker.session(0).unwrap().accepted_count(), 2);
    }

    #[test]
    fn test_one_axis_beyond_tolerance_is_accepted() {
        let mut tracker = PointerTracker::default();
        tracker.down(0, Point::ZERO);
        assert_eq!(tracker.move_to(0, Point::new(0.0, 2.0)), MoveOutcome::Accepted);
    }

    #[test]
    fn test_move_extends_with_midpoint_quad() {
        let mut tracker = PointerTracker::default();
        tracker.down(3, Point::new(10.0, 10.0));
        tracker.move_to(3, Point::new(20.0, 30.0));

        let curve = tracker.session(3).unwrap().curve();
        assert_eq!(
            curve.elements().last(),
            Some(&PathEl::QuadTo(Point::new(10.0, 10.0), Point::new(15.0, 20.0)))
        );
    }

    #[test]
    fn test_up_ends_with_line_to_lift_point() {
        let mut tracker = PointerTracker::default();
        tracker.down(0, Point::ZERO);
        tracker.move_to(0, Point::new(10.0, 0.0));
        let finished = tracker.up(0, Point::new(12.0, 3.0)).unwrap();

        assert_eq!(
            finished.curve.elements().last(),
            Some(&PathEl::LineTo(Point::new(12.0, 3.0)))
        );
        assert_eq!(
            finished.points,
            vec![Point::ZERO, Point::new(10.0, 0.0), Point::new(12.0, 3.0)]
        );
    }

    #[test]
    fn test_out_of_range_pointer_is_ignored() {
        let mut tracker = PointerTracker::default();
        tracker.down(1, Point::ZERO);

        assert!(!tracker.down(MAX_POINTERS, Point::new(50.0, 50.0)));
        assert_eq!(tracker.move_to(MAX_POINTERS, Point::new(80.0, 80.0)), MoveOutcome::NoSession);
        assert!(tracker.up(MAX_POINTERS, Point::new(90.0, 90.0)).is_none());

        assert_eq!(tracker.active_count(), 1);
        assert_eq!(tracker.session(1).unwrap().accepted_count(), 1);
    }

    #[test]
    fn test_move_and_up_without_down_are_ignored() {
        let mut tracker = PointerTracker::default();
        assert_eq!(tracker.move_to(0, Point::new(10.0, 10.0)), MoveOutcome::NoSession);
        assert!(tracker.up(0, Point::new(10.0, 10.0)).is_none());
    }

    #[test]
    fn test_pointers_are_independent() {
        let mut tracker = PointerTracker::default();
        tracker.down(0, Point::ZERO);
        tracker.down(7, Point::new(100.0, 100.0));
        tracker.move_to(7, Point::new(110.0, 100.0));
        tracker.move_to(0, Point::new(0.0, 10.0));

        assert_eq!(tracker.session(0).unwrap().points(), &[Point::ZERO, Point::new(0.0, 10.0)]);
        assert_eq!(
            tracker.session(7).unwrap().points(),
            &[Point::new(100.0, 100.0), Point::new(110.0, 100.0)]
        );

        let ids: Vec<PointerId> = tracker.active().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![0, 7]);

        tracker.up(0, Point::new(0.0, 12.0));
        assert!(tracker.is_active(7));
    }

    #[test]
    fn test_down_restarts_session() {
        let mut tracker = PointerTracker::default();
        tracker.down(0, Point::ZERO);
        tracker.move_to(0, Point::new(30.0, 30.0));
        tracker.down(0, Point::new(50.0, 50.0));

        assert_eq!(tracker.session(0).unwrap().points(), &[Point::new(50.0, 50.0)]);
    }

    #[test]
    fn test_clear_discards_sessions() {
        let mut tracker = PointerTracker::default();
        tracker.down(0, Point::ZERO);
        tracker.down(4, Point::ZERO);
        tracker.clear();
        assert_eq!(tracker.active_count(), 0);
    }
}
