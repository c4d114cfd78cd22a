//! Pointer-relative offsets
//!
//! The shared math behind tilt, magnetic and spotlight effects: where the
//! pointer sits relative to an element, either normalized to the element's
//! size or in pixels from its center.

use flair_core::{Point, Rect};

/// Pointer position normalized to the element, in `[-0.5, 0.5]` per axis.
///
/// `(0, 0)` is the element's center, `(-0.5, -0.5)` its top-left corner.
/// Returns `None` when the element has no area yet (not laid out).
pub fn normalized_offset(bounds: &Rect, pointer: Point) -> Option<Point> {
    if bounds.is_empty() {
        return None;
    }
    let local = bounds.to_local(pointer);
    Some(
        Point::new(
            local.x / bounds.width() - 0.5,
            local.y / bounds.height() - 0.5,
        )
        .clamp(-0.5, 0.5),
    )
}

/// Pixel offset of the pointer from the element's center
pub fn center_offset(bounds: &Rect, pointer: Point) -> Option<Point> {
    if bounds.is_empty() {
        return None;
    }
    Some(pointer - bounds.center())
}

/// Map `value` from the `from` range onto the `to` range, clamping at the ends
pub fn map_range(value: f32, from: (f32, f32), to: (f32, f32)) -> f32 {
    let span = from.1 - from.0;
    if span == 0.0 {
        return to.0;
    }
    let t = ((value - from.0) / span).clamp(0.0, 1.0);
    to.0 + (to.1 - to.0) * t
}

/// Hover and pointer position over one element.
///
/// Leaving always returns the tracker to neutral: no hover, zero offset, no
/// position.
#[derive(Clone, Debug, Default)]
pub struct PointerTracker {
    bounds: Option<Rect>,
    hovered: bool,
    /// Last pointer position in element-local pixels
    local: Option<Point>,
    /// Last normalized offset
    offset: Point,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_bounds(&mut self, bounds: Option<Rect>) {
        self.bounds = bounds;
        if bounds.is_none() {
            self.leave();
        }
    }

    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn enter(&mut self, pointer: Point) {
        self.hovered = true;
        self.move_to(pointer);
    }

    /// Record a pointer move; returns false when there are no usable bounds
    pub fn move_to(&mut self, pointer: Point) -> bool {
        let Some(bounds) = self.bounds.filter(|b| !b.is_empty()) else {
            return false;
        };
        self.hovered = true;
        self.local = Some(bounds.to_local(pointer));
        self.offset = normalized_offset(&bounds, pointer).unwrap_or(Point::ZERO);
        true
    }

    pub fn leave(&mut self) {
        self.hovered = false;
        self.local = None;
        self.offset = Point::ZERO;
    }

    /// Normalized offset, `(0, 0)` when not hovered
    pub fn offset(&self) -> Point {
        self.offset
    }

    /// Position relative to the element's top-left corner
    pub fn local_position(&self) -> Option<Point> {
        self.local
    }

    /// Pixel offset from the element center, `(0, 0)` when not hovered
    pub fn center_offset(&self) -> Point {
        match (self.bounds, self.local) {
            (Some(bounds), Some(local)) => {
                local - Point::new(bounds.width() / 2.0, bounds.height() / 2.0)
            }
            _ => Point::ZERO,
        }
    }
}
