//! Interaction events
//!
//! Events the host feeds into effects: pointer movement over an element,
//! document scrolling, layout changes, visibility reports and lifecycle.

use crate::geometry::{Point, Rect};

/// Event type identifier
pub type EventType = u32;

/// Event types understood by effects
pub mod event_types {
    use super::EventType;

    pub const POINTER_DOWN: EventType = 1;
    pub const POINTER_UP: EventType = 2;
    pub const POINTER_MOVE: EventType = 3;
    pub const POINTER_ENTER: EventType = 4;
    pub const POINTER_LEAVE: EventType = 5;
    pub const SCROLL: EventType = 30;
    pub const RESIZE: EventType = 40;
    /// Element bounds were (re)computed by layout
    pub const LAYOUT: EventType = 41;
    /// Fraction of the element inside the viewport changed
    pub const VISIBILITY: EventType = 45;

    // Element lifecycle events
    pub const MOUNT: EventType = 60;
    pub const UNMOUNT: EventType = 61;
}

/// Document and viewport metrics at the time of a scroll event
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollMetrics {
    /// Current vertical scroll offset of the document
    pub offset: f32,
    /// Total height of the scrollable content
    pub content_height: f32,
    /// Height of the visible viewport
    pub viewport_height: f32,
}

impl ScrollMetrics {
    pub const fn new(offset: f32, content_height: f32, viewport_height: f32) -> Self {
        Self {
            offset,
            content_height,
            viewport_height,
        }
    }

    /// Distance the document can scroll; zero when the content fits
    pub fn max_offset(&self) -> f32 {
        (self.content_height - self.viewport_height).max(0.0)
    }
}

/// A UI event with associated data
#[derive(Clone, Debug)]
pub struct Event {
    pub event_type: EventType,
    pub data: EventData,
    /// Milliseconds since an arbitrary host epoch
    pub timestamp: u64,
}

/// Event-specific data
#[derive(Clone, Debug)]
pub enum EventData {
    /// Pointer position in the same coordinate space as element bounds
    Pointer { position: Point },
    Scroll(ScrollMetrics),
    /// New element bounds, or `None` when the element was detached
    Layout(Option<Rect>),
    Resize { width: f32, height: f32 },
    /// Visible fraction of the element (0.0 to 1.0)
    Visibility { ratio: f32 },
    None,
}

impl Event {
    pub fn new(event_type: EventType, data: EventData) -> Self {
        Self {
            event_type,
            data,
            timestamp: 0,
        }
    }

    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn pointer_move(x: f32, y: f32) -> Self {
        Self::new(
            event_types::POINTER_MOVE,
            EventData::Pointer {
                position: Point::new(x, y),
            },
        )
    }

    pub fn pointer_enter(x: f32, y: f32) -> Self {
        Self::new(
            event_types::POINTER_ENTER,
            EventData::Pointer {
                position: Point::new(x, y),
            },
        )
    }

    pub fn pointer_down(x: f32, y: f32) -> Self {
        Self::new(
            event_types::POINTER_DOWN,
            EventData::Pointer {
                position: Point::new(x, y),
            },
        )
    }

    pub fn pointer_leave() -> Self {
        Self::new(event_types::POINTER_LEAVE, EventData::None)
    }

    pub fn scroll(metrics: ScrollMetrics) -> Self {
        Self::new(event_types::SCROLL, EventData::Scroll(metrics))
    }

    pub fn layout(bounds: Option<Rect>) -> Self {
        Self::new(event_types::LAYOUT, EventData::Layout(bounds))
    }

    pub fn visibility(ratio: f32) -> Self {
        Self::new(event_types::VISIBILITY, EventData::Visibility { ratio })
    }

    pub fn unmount() -> Self {
        Self::new(event_types::UNMOUNT, EventData::None)
    }

    /// Pointer position, if this is a pointer event carrying one
    pub fn position(&self) -> Option<Point> {
        match self.data {
            EventData::Pointer { position } => Some(position),
            _ => None,
        }
    }
}

/// Implemented by effects that react to host events.
///
/// Returns `true` when the event changed the effect's state and the host
/// should repaint.
pub trait EventHandler {
    fn handle_event(&mut self, event: &Event) -> bool;
}
