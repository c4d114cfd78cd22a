//! Radial spotlight that follows the pointer across an element

use flair_animation::{Easing, KeyframeProperties, PropertyTween};
use flair_core::{event_types, Event, EventData, EventHandler, Point, Rect};
use serde::{Deserialize, Serialize};

use crate::config::clamp_field;
use crate::pointer::PointerTracker;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpotlightConfig {
    /// Gradient diameter in pixels
    pub size_px: f32,
    /// CSS color of the gradient center
    pub color: String,
    /// Fade in/out duration when the pointer enters or leaves
    pub fade_ms: f32,
}

impl Default for SpotlightConfig {
    fn default() -> Self {
        Self {
            size_px: 400.0,
            color: "rgba(124, 58, 237, 0.15)".to_string(),
            fade_ms: 200.0,
        }
    }
}

impl SpotlightConfig {
    pub fn sanitized(self) -> Self {
        Self {
            size_px: clamp_field("spotlight.size_px", self.size_px, 0.0, f32::MAX),
            fade_ms: clamp_field("spotlight.fade_ms", self.fade_ms, 0.0, f32::MAX),
            color: self.color,
        }
    }
}

/// What to paint for the spotlight this frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpotlightGradient<'a> {
    /// Gradient center relative to the element's top-left corner
    pub center: Point,
    pub size_px: f32,
    pub color: &'a str,
    pub opacity: f32,
}

pub struct Spotlight {
    config: SpotlightConfig,
    pointer: PointerTracker,
    /// Last focal point, kept while fading out
    focal: Point,
    fade: PropertyTween,
}

impl Spotlight {
    pub fn new(config: SpotlightConfig) -> Self {
        let config = config.sanitized();
        Self {
            pointer: PointerTracker::new(),
            focal: Point::ZERO,
            fade: PropertyTween::new(KeyframeProperties::opacity(0.0), config.fade_ms, Easing::EaseOut),
            config,
        }
    }

    pub fn set_bounds(&mut self, bounds: Option<Rect>) {
        self.pointer.set_bounds(bounds);
        if !self.pointer.is_hovered() {
            self.fade.snap_to(KeyframeProperties::opacity(0.0));
        }
    }

    pub fn is_hovered(&self) -> bool {
        self.pointer.is_hovered()
    }

    pub fn pointer_enter(&mut self, pointer: Point) {
        self.pointer.enter(pointer);
        self.update_focal();
        self.fade.retarget(KeyframeProperties::opacity(1.0));
    }

    pub fn pointer_move(&mut self, pointer: Point) {
        if self.pointer.move_to(pointer) {
            self.update_focal();
        }
    }

    pub fn pointer_leave(&mut self) {
        self.pointer.leave();
        self.fade.retarget(KeyframeProperties::opacity(0.0));
    }

    pub fn tick(&mut self, dt_ms: f32) {
        self.fade.tick(dt_ms);
    }

    /// Focal point while hovered, relative to the element's top-left corner
    pub fn focal_point(&self) -> Option<Point> {
        self.pointer.local_position()
    }

    /// Gradient to paint, `None` once fully faded out
    pub fn gradient(&self) -> Option<SpotlightGradient<'_>> {
        let opacity = self.fade.current().resolved_opacity();
        if opacity <= 0.0 {
            return None;
        }
        Some(SpotlightGradient {
            center: self.focal,
            size_px: self.config.size_px,
            color: &self.config.color,
            opacity,
        })
    }

    fn update_focal(&mut self) {
        if let Some(local) = self.pointer.local_position() {
            self.focal = local;
        }
    }
}

impl Default for Spotlight {
    fn default() -> Self {
        Self::new(SpotlightConfig::default())
    }
}

impl EventHandler for Spotlight {
    fn handle_event(&mut self, event: &Event) -> bool {
        match (event.event_type, &event.data) {
            (event_types::POINTER_ENTER, EventData::Pointer { position }) => {
                self.pointer_enter(*position);
                true
            }
            (event_types::POINTER_MOVE, EventData::Pointer { position }) => {
                self.pointer_move(*position);
                self.pointer.is_hovered()
            }
            (event_types::POINTER_LEAVE, _) => {
                self.pointer_leave();
                true
            }
            (event_types::LAYOUT, EventData::Layout(bounds)) => {
                self.set_bounds(*bounds);
                true
            }
            (event_types::UNMOUNT, _) => {
                self.pointer.leave();
                self.fade.snap_to(KeyframeProperties::opacity(0.0));
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spotlight() -> Spotlight {
        let mut spotlight = Spotlight::default();
        spotlight.set_bounds(Some(Rect::new(20.0, 40.0, 300.0, 200.0)));
        spotlight
    }

    #[test]
    fn test_focal_point_is_local() {
        let mut spotlight = spotlight();
        spotlight.pointer_enter(Point::new(70.0, 90.0));
        assert_eq!(spotlight.focal_point(), Some(Point::new(50.0, 50.0)));

        spotlight.pointer_move(Point::new(120.0, 140.0));
        assert_eq!(spotlight.focal_point(), Some(Point::new(100.0, 100.0)));
    }

    #[test]
    fn test_fades_in_and_out() {
        let mut spotlight = spotlight();
        assert!(spotlight.gradient().is_none());

        spotlight.pointer_enter(Point::new(70.0, 90.0));
        spotlight.tick(200.0);
        let gradient = spotlight.gradient().unwrap();
        assert_eq!(gradient.opacity, 1.0);
        assert_eq!(gradient.size_px, 400.0);
        assert_eq!(gradient.color, "rgba(124, 58, 237, 0.15)");

        spotlight.pointer_leave();
        assert_eq!(spotlight.focal_point(), None);
        spotlight.tick(100.0);
        let fading = spotlight.gradient().unwrap();
        assert!(fading.opacity < 1.0);
        assert_eq!(fading.center, Point::new(50.0, 50.0));

        spotlight.tick(100.0);
        assert!(spotlight.gradient().is_none());
    }

    #[test]
    fn test_unmount_clears_immediately() {
        let mut spotlight = spotlight();
        spotlight.handle_event(&Event::pointer_enter(70.0, 90.0));
        spotlight.tick(200.0);
        spotlight.handle_event(&Event::unmount());
        assert!(spotlight.gradient().is_none());
        assert!(!spotlight.is_hovered());
    }
}
