//! Click ripples

use flair_animation::Easing;
use flair_core::{event_types, Event, EventData, EventHandler, Point, Rect};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::config::clamp_field;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RippleConfig {
    pub duration_ms: f32,
    /// Final diameter in pixels
    pub max_size_px: f32,
    pub start_opacity: f32,
    pub easing: Easing,
}

impl Default for RippleConfig {
    fn default() -> Self {
        Self {
            duration_ms: 600.0,
            max_size_px: 300.0,
            start_opacity: 0.5,
            easing: Easing::EaseOut,
        }
    }
}

impl RippleConfig {
    pub fn sanitized(self) -> Self {
        Self {
            duration_ms: clamp_field("ripple.duration_ms", self.duration_ms, 1.0, f32::MAX),
            max_size_px: clamp_field("ripple.max_size_px", self.max_size_px, 0.0, f32::MAX),
            start_opacity: clamp_field("ripple.start_opacity", self.start_opacity, 0.0, 1.0),
            easing: self.easing,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Ripple {
    id: u64,
    origin: Point,
    elapsed_ms: f32,
}

/// One ripple to paint
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RippleFrame {
    pub id: u64,
    /// Center relative to the button's top-left corner
    pub center: Point,
    /// Current diameter in pixels
    pub size: f32,
    pub opacity: f32,
}

/// Button that spawns an expanding ripple at each press point
pub struct RippleButton {
    config: RippleConfig,
    bounds: Option<Rect>,
    ripples: SmallVec<[Ripple; 4]>,
    next_id: u64,
}

impl RippleButton {
    pub fn new(config: RippleConfig) -> Self {
        Self {
            config: config.sanitized(),
            bounds: None,
            ripples: SmallVec::new(),
            next_id: 0,
        }
    }

    pub fn set_bounds(&mut self, bounds: Option<Rect>) {
        self.bounds = bounds;
    }

    /// Spawn a ripple at `pointer`; `None` when the button is not laid out
    pub fn press(&mut self, pointer: Point) -> Option<u64> {
        let bounds = self.bounds.filter(|b| !b.is_empty())?;
        let id = self.next_id;
        self.next_id += 1;
        self.ripples.push(Ripple {
            id,
            origin: bounds.to_local(pointer),
            elapsed_ms: 0.0,
        });
        tracing::trace!(id, "ripple spawned");
        Some(id)
    }

    /// Advance every ripple, dropping the ones that have finished
    pub fn tick(&mut self, dt_ms: f32) {
        if dt_ms <= 0.0 {
            return;
        }
        let duration = self.config.duration_ms;
        for ripple in &mut self.ripples {
            ripple.elapsed_ms += dt_ms;
        }
        self.ripples.retain(|r| r.elapsed_ms < duration);
    }

    pub fn is_animating(&self) -> bool {
        !self.ripples.is_empty()
    }

    pub fn ripple_count(&self) -> usize {
        self.ripples.len()
    }

    pub fn frames(&self) -> impl Iterator<Item = RippleFrame> + '_ {
        let config = self.config;
        self.ripples.iter().map(move |ripple| {
            let t = config
                .easing
                .apply(ripple.elapsed_ms / config.duration_ms);
            RippleFrame {
                id: ripple.id,
                center: ripple.origin,
                size: config.max_size_px * t,
                opacity: config.start_opacity * (1.0 - t),
            }
        })
    }

    pub fn clear(&mut self) {
        self.ripples.clear();
    }
}

impl Default for RippleButton {
    fn default() -> Self {
        Self::new(RippleConfig::default())
    }
}

impl EventHandler for RippleButton {
    fn handle_event(&mut self, event: &Event) -> bool {
        match (event.event_type, &event.data) {
            (event_types::POINTER_DOWN, EventData::Pointer { position }) => {
                self.press(*position).is_some()
            }
            (event_types::LAYOUT, EventData::Layout(bounds)) => {
                self.set_bounds(*bounds);
                false
            }
            (event_types::UNMOUNT, _) => {
                self.clear();
                true
            }
            _ => false,
        }
    }
}
