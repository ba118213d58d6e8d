//! Input events delivered by the windowing backend

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Keys the application shell reacts to; everything else is `Other`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Escape,
    F5,
    F11,
    Char(char),
    Other(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    PointerMove { position: Point },
    PointerPress { position: Point, button: PointerButton },
    Key { key: Key },
    Quit,
}

/// A typed input event with a monotonic timestamp
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputEvent {
    pub at: Duration,
    pub kind: EventKind,
}

impl InputEvent {
    pub fn new(at: Duration, kind: EventKind) -> Self {
        Self { at, kind }
    }

    /// Screen position for pointer events
    pub fn position(&self) -> Option<Point> {
        match self.kind {
            EventKind::PointerMove { position } | EventKind::PointerPress { position, .. } => {
                Some(position)
            }
            EventKind::Key { .. } | EventKind::Quit => None,
        }
    }

    /// Same event with its position translated by `-origin`
    pub fn relative_to(&self, origin: Point) -> Self {
        let shift = |p: Point| Point::new(p.x - origin.x, p.y - origin.y);
        let kind = match self.kind {
            EventKind::PointerMove { position } => EventKind::PointerMove {
                position: shift(position),
            },
            EventKind::PointerPress { position, button } => EventKind::PointerPress {
                position: shift(position),
                button,
            },
            other => other,
        };
        Self { at: self.at, kind }
    }
}
