//! 3D tilt card with an optional glare highlight
//!
//! The pointer's normalized offset over the card drives two rotations through
//! a spring, so the card eases toward the pointer instead of snapping.

use flair_animation::{Spring, SpringConfig, SpringPoint};
use flair_core::{event_types, Event, EventData, EventHandler, Point, Rect};
use serde::{Deserialize, Serialize};

use crate::config::clamp_field;
use crate::pointer::{map_range, PointerTracker};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TiltConfig {
    /// Maximum rotation in degrees at the card's edges
    pub max_tilt_deg: f32,
    pub glare: bool,
    /// Scale applied while hovered
    pub hover_scale: f32,
    pub spring: SpringConfig,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            max_tilt_deg: 10.0,
            glare: true,
            hover_scale: 1.02,
            spring: SpringConfig::tilt(),
        }
    }
}

impl TiltConfig {
    pub fn sanitized(self) -> Self {
        Self {
            max_tilt_deg: clamp_field("tilt.max_tilt_deg", self.max_tilt_deg, 0.0, 90.0),
            glare: self.glare,
            hover_scale: clamp_field("tilt.hover_scale", self.hover_scale, 0.1, 10.0),
            spring: self.spring.sanitized(),
        }
    }
}

/// Glare highlight position, in percent of the card's size
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glare {
    pub x_percent: f32,
    pub y_percent: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TiltTransform {
    /// Rotation about the horizontal axis, degrees
    pub rotate_x: f32,
    /// Rotation about the vertical axis, degrees
    pub rotate_y: f32,
    pub scale: f32,
    /// Present only while hovered and glare is enabled
    pub glare: Option<Glare>,
}

impl TiltTransform {
    pub const NEUTRAL: TiltTransform = TiltTransform {
        rotate_x: 0.0,
        rotate_y: 0.0,
        scale: 1.0,
        glare: None,
    };
}

pub struct TiltCard {
    config: TiltConfig,
    pointer: PointerTracker,
    offset: SpringPoint,
    scale: Spring,
}

impl TiltCard {
    pub fn new(config: TiltConfig) -> Self {
        let config = config.sanitized();
        Self {
            pointer: PointerTracker::new(),
            offset: SpringPoint::new(config.spring, Point::ZERO),
            scale: Spring::new(config.spring, 1.0),
            config,
        }
    }

    pub fn config(&self) -> &TiltConfig {
        &self.config
    }

    pub fn set_bounds(&mut self, bounds: Option<Rect>) {
        self.pointer.set_bounds(bounds);
        self.retarget();
    }

    pub fn is_hovered(&self) -> bool {
        self.pointer.is_hovered()
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

    /// Advance the springs by `dt_ms` milliseconds
    pub fn tick(&mut self, dt_ms: f32) {
        let dt = dt_ms / 1000.0;
        self.offset.step(dt);
        self.scale.step(dt);
    }

    pub fn is_animating(&self) -> bool {
        !self.offset.is_settled() || !self.scale.is_settled()
    }

    /// Transform at the current spring position
    pub fn transform(&self) -> TiltTransform {
        self.transform_for(self.offset.value(), self.scale.value())
    }

    /// Transform the springs are heading toward
    pub fn target_transform(&self) -> TiltTransform {
        self.transform_for(self.offset.target(), self.scale.target())
    }

    fn transform_for(&self, offset: Point, scale: f32) -> TiltTransform {
        let tilt = self.config.max_tilt_deg;
        let glare = (self.config.glare && self.pointer.is_hovered()).then(|| {
            let raw = self.pointer.offset();
            Glare {
                x_percent: raw.x * 100.0 + 50.0,
                y_percent: raw.y * 100.0 + 50.0,
            }
        });
        TiltTransform {
            rotate_x: map_range(offset.y, (-0.5, 0.5), (tilt, -tilt)),
            rotate_y: map_range(offset.x, (-0.5, 0.5), (-tilt, tilt)),
            scale,
            glare,
        }
    }

    fn retarget(&mut self) {
        self.offset.set_target(self.pointer.offset());
        let scale = if self.pointer.is_hovered() {
            self.config.hover_scale
        } else {
            1.0
        };
        self.scale.set_target(scale);
    }
}

impl Default for TiltCard {
    fn default() -> Self {
        Self::new(TiltConfig::default())
    }
}

impl EventHandler for TiltCard {
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
                self.offset.snap_to(Point::ZERO);
                self.scale.snap_to(1.0);
                true
            }
            _ => false,
        }
    }
}
