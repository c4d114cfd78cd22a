//! Magnetic pull toward the pointer

use flair_animation::{SpringConfig, SpringPoint};
use flair_core::{event_types, Event, EventData, EventHandler, Point, Rect};
use serde::{Deserialize, Serialize};

use crate::config::clamp_field;
use crate::pointer::PointerTracker;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MagneticConfig {
    /// Fraction of the pointer's distance from center the element follows
    pub strength: f32,
    pub spring: SpringConfig,
}

impl Default for MagneticConfig {
    fn default() -> Self {
        Self {
            strength: 0.3,
            spring: SpringConfig::magnetic(),
        }
    }
}

impl MagneticConfig {
    pub fn sanitized(self) -> Self {
        Self {
            strength: clamp_field("magnetic.strength", self.strength, 0.0, 1.0),
            spring: self.spring.sanitized(),
        }
    }
}

/// An element that drifts toward the pointer while hovered
pub struct Magnetic {
    config: MagneticConfig,
    pointer: PointerTracker,
    translation: SpringPoint,
}

impl Magnetic {
    pub fn new(config: MagneticConfig) -> Self {
        let config = config.sanitized();
        Self {
            pointer: PointerTracker::new(),
            translation: SpringPoint::new(config.spring, Point::ZERO),
            config,
        }
    }

    pub fn set_bounds(&mut self, bounds: Option<Rect>) {
        self.pointer.set_bounds(bounds);
        self.retarget();
    }

    pub fn pointer_enter(&mut self, pointer: Point) {
        self.pointer.enter(pointer);
        self.retarget();
    }

    pub fn pointer_move(&mut self, pointer: Point) {
        if self.pointer.move_to(pointer) {
            self.retarget();
        }
    }

    pub fn pointer_leave(&mut self) {
        self.pointer.leave();
        self.retarget();
    }

    pub fn tick(&mut self, dt_ms: f32) {
        self.translation.step(dt_ms / 1000.0);
    }

    pub fn is_animating(&self) -> bool {
        !self.translation.is_settled()
    }

    /// Current translation in pixels
    pub fn translation(&self) -> Point {
        self.translation.value()
    }

    pub fn target_translation(&self) -> Point {
        self.translation.target()
    }

    fn retarget(&mut self) {
        let target = self.pointer.center_offset() * self.config.strength;
        self.translation.set_target(target);
    }
}

impl Default for Magnetic {
    fn default() -> Self {
        Self::new(MagneticConfig::default())
    }
}

impl EventHandler for Magnetic {
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
                self.pointer_leave();
                self.translation.snap_to(Point::ZERO);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button() -> Magnetic {
        let mut magnetic = Magnetic::default();
        magnetic.set_bounds(Some(Rect::new(0.0, 0.0, 100.0, 40.0)));
        magnetic
    }

    #[test]
    fn test_pull_is_scaled_offset() {
        let mut magnetic = button();
        magnetic.pointer_enter(Point::new(100.0, 40.0));
        let target = magnetic.target_translation();
        assert!((target.x - 15.0).abs() < 1e-5);
        assert!((target.y - 6.0).abs() < 1e-5);
    }

    #[test]
    fn test_center_has_no_pull() {
        let mut magnetic = button();
        magnetic.pointer_enter(Point::new(50.0, 20.0));
        assert!(magnetic.target_translation().is_zero());
    }

    #[test]
    fn test_spring_settles_on_target() {
        let mut magnetic = button();
        magnetic.pointer_enter(Point::new(0.0, 0.0));
        for _ in 0..600 {
            magnetic.tick(16.0);
        }
        let value = magnetic.translation();
        assert!((value.x + 15.0).abs() < 0.01);
        assert!((value.y + 6.0).abs() < 0.01);
    }

    #[test]
    fn test_leave_resets() {
        let mut magnetic = button();
        magnetic.pointer_enter(Point::new(90.0, 30.0));
        magnetic.tick(100.0);
        magnetic.pointer_leave();
        assert!(magnetic.target_translation().is_zero());
        magnetic.pointer_leave();
        assert!(magnetic.target_translation().is_zero());
    }

    #[test]
    fn test_unmount_snaps_home() {
        let mut magnetic = button();
        magnetic.handle_event(&Event::pointer_enter(90.0, 30.0));
        magnetic.tick(100.0);
        magnetic.handle_event(&Event::unmount());
        assert!(magnetic.translation().is_zero());
        assert!(!magnetic.is_animating());
    }
}
