//! Pointer input events delivered by the host.

use crate::pointer::PointerId;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// One pointer event in surface coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        id: PointerId,
        position: Point,
    },
    /// A batch of motion for one pointer: buffered `history` samples, oldest
    /// first, followed by the current `position`.
    Move {
        id: PointerId,
        history: Vec<Point>,
        position: Point,
    },
    Up {
        id: PointerId,
        position: Point,
    },
}

impl PointerEvent {
    /// Pointer this event belongs to.
    pub fn id(&self) -> PointerId {
        match self {
            PointerEvent::Down { id, .. } | PointerEvent::Move { id, .. } | PointerEvent::Up { id, .. } => *id,
        }
    }

    /// Samples carried by the event, in processing order.
    pub fn samples(&self) -> impl Iterator<Item = Point> + '_ {
        let (history, position): (&[Point], Point) = match self {
            PointerEvent::Down { position, .. } | PointerEvent::Up { position, .. } => (&[][..], *position),
            PointerEvent::Move { history, position, .. } => (history.as_slice(), *position),
        };
        history.iter().copied().chain(std::iter::once(position))
    }
}
