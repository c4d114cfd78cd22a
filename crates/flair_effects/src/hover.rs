//! Hover and press transitions
//!
//! Each [`HoverKind`] is a fixed parameter bundle: the properties at rest,
//! the properties while hovered, and how long the transition takes.

use flair_animation::{
    Easing, KeyframeProperties, KeyframeTrack, PropertyTween, Spring, SpringConfig,
};
use flair_core::{event_types, Event, EventHandler};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoverKind {
    /// Glow layer fades in behind the element
    Glow,
    /// Underline grows from the left edge
    Underline,
    /// Gradient border fades in
    BorderGradient,
    /// Card rises 8 px while hovered
    Lift,
    /// Slight grow while hovered
    Scale,
}

/// Transition parameters for one hover kind
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HoverParams {
    pub duration_ms: f32,
    pub easing: Easing,
    pub rest: KeyframeProperties,
    pub hovered: KeyframeProperties,
}

impl HoverKind {
    pub fn params(self) -> HoverParams {
        match self {
            HoverKind::Glow | HoverKind::BorderGradient => HoverParams {
                duration_ms: 300.0,
                easing: Easing::EaseOut,
                rest: KeyframeProperties::opacity(0.0),
                hovered: KeyframeProperties::opacity(1.0),
            },
            HoverKind::Underline => HoverParams {
                duration_ms: 300.0,
                easing: Easing::EaseOut,
                rest: KeyframeProperties::default().with_scale(0.0),
                hovered: KeyframeProperties::default().with_scale(1.0),
            },
            HoverKind::Lift => HoverParams {
                duration_ms: 300.0,
                easing: Easing::EaseOut,
                rest: KeyframeProperties::default().with_translate_y(0.0),
                hovered: KeyframeProperties::default().with_translate_y(-8.0),
            },
            HoverKind::Scale => HoverParams {
                duration_ms: 300.0,
                easing: Easing::EaseOut,
                rest: KeyframeProperties::default().with_scale(1.0),
                hovered: KeyframeProperties::default().with_scale(1.02),
            },
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlowIntensity {
    Low,
    #[default]
    Medium,
    High,
}

impl GlowIntensity {
    /// Glow blur radius in pixels
    pub fn radius_px(self) -> f32 {
        match self {
            GlowIntensity::Low => 10.0,
            GlowIntensity::Medium => 20.0,
            GlowIntensity::High => 30.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonSize {
    Sm,
    #[default]
    Md,
    Lg,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ButtonMetrics {
    pub padding_x: f32,
    pub padding_y: f32,
    pub font_size: f32,
}

impl ButtonSize {
    pub fn metrics(self) -> ButtonMetrics {
        let (padding_x, padding_y, font_size) = match self {
            ButtonSize::Sm => (16.0, 8.0, 14.0),
            ButtonSize::Md => (24.0, 12.0, 16.0),
            ButtonSize::Lg => (32.0, 16.0, 18.0),
        };
        ButtonMetrics {
            padding_x,
            padding_y,
            font_size,
        }
    }
}

/// Tween between a hover kind's rest and hovered properties
pub struct HoverTransition {
    kind: HoverKind,
    params: HoverParams,
    tween: PropertyTween,
    hovered: bool,
}

impl HoverTransition {
    pub fn new(kind: HoverKind) -> Self {
        let params = kind.params();
        Self {
            kind,
            params,
            tween: PropertyTween::new(params.rest, params.duration_ms, params.easing),
            hovered: false,
        }
    }

    pub fn kind(&self) -> HoverKind {
        self.kind
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn set_hovered(&mut self, hovered: bool) -> bool {
        if hovered == self.hovered {
            return false;
        }
        self.hovered = hovered;
        let target = if hovered {
            self.params.hovered
        } else {
            self.params.rest
        };
        self.tween.retarget(target);
        true
    }

    pub fn tick(&mut self, dt_ms: f32) {
        self.tween.tick(dt_ms);
    }

    pub fn is_animating(&self) -> bool {
        !self.tween.is_finished()
    }

    pub fn properties(&self) -> KeyframeProperties {
        self.tween.current()
    }
}

impl EventHandler for HoverTransition {
    fn handle_event(&mut self, event: &Event) -> bool {
        match event.event_type {
            event_types::POINTER_ENTER => self.set_hovered(true),
            event_types::POINTER_LEAVE | event_types::UNMOUNT => self.set_hovered(false),
            _ => false,
        }
    }
}

/// Highlight band swept across text once per hover.
///
/// The band rests just off the left edge (-100 percent of the element
/// width), crosses to +100 percent over 800 ms on pointer enter, then rests
/// again until the next enter.
pub struct ShineSweep {
    track: KeyframeTrack,
    hovered: bool,
}

impl ShineSweep {
    pub const DURATION_MS: u32 = 800;
    pub const REST_PERCENT: f32 = -100.0;

    pub fn new() -> Self {
        let mut track = KeyframeTrack::builder()
            .at(0, Self::REST_PERCENT)
            .at(Self::DURATION_MS, -Self::REST_PERCENT)
            .ease(Easing::EaseInOut)
            .build();
        track.stop();
        Self {
            track,
            hovered: false,
        }
    }

    pub fn set_hovered(&mut self, hovered: bool) -> bool {
        if hovered == self.hovered {
            return false;
        }
        self.hovered = hovered;
        if hovered {
            self.track.restart();
        } else {
            self.track.stop();
        }
        true
    }

    pub fn tick(&mut self, dt_ms: f32) {
        self.track.tick(dt_ms);
    }

    pub fn is_animating(&self) -> bool {
        self.hovered && self.track.is_playing()
    }

    /// Band translate-x as a percentage of the element width
    pub fn offset_percent(&self) -> f32 {
        if self.is_animating() {
            self.track.value()
        } else {
            Self::REST_PERCENT
        }
    }
}

impl Default for ShineSweep {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for ShineSweep {
    fn handle_event(&mut self, event: &Event) -> bool {
        match event.event_type {
            event_types::POINTER_ENTER => self.set_hovered(true),
            event_types::POINTER_LEAVE | event_types::UNMOUNT => self.set_hovered(false),
            _ => false,
        }
    }
}

/// Icon that springs to a slight rotation while hovered
pub struct IconRotate {
    angle_deg: f32,
    rotation: Spring,
}

impl IconRotate {
    pub const DEFAULT_ANGLE_DEG: f32 = 15.0;

    pub fn new(angle_deg: f32) -> Self {
        Self {
            angle_deg,
            rotation: Spring::new(SpringConfig::icon(), 0.0),
        }
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.rotation
            .set_target(if hovered { self.angle_deg } else { 0.0 });
    }

    pub fn tick(&mut self, dt_ms: f32) {
        self.rotation.step(dt_ms / 1000.0);
    }

    pub fn rotation_deg(&self) -> f32 {
        self.rotation.value()
    }
}

impl Default for IconRotate {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ANGLE_DEG)
    }
}

impl EventHandler for IconRotate {
    fn handle_event(&mut self, event: &Event) -> bool {
        match event.event_type {
            event_types::POINTER_ENTER => {
                self.set_hovered(true);
                true
            }
            event_types::POINTER_LEAVE => {
                self.set_hovered(false);
                true
            }
            _ => false,
        }
    }
}

/// Button scale: grows slightly on hover, shrinks while pressed
pub struct PressScale {
    hovered: bool,
    pressed: bool,
    scale: Spring,
}

impl PressScale {
    pub const HOVER_SCALE: f32 = 1.02;
    pub const TAP_SCALE: f32 = 0.98;

    pub fn new() -> Self {
        Self {
            hovered: false,
            pressed: false,
            scale: Spring::new(SpringConfig::stiff(), 1.0),
        }
    }

    pub fn target_scale(&self) -> f32 {
        if self.pressed {
            Self::TAP_SCALE
        } else if self.hovered {
            Self::HOVER_SCALE
        } else {
            1.0
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale.value()
    }

    pub fn tick(&mut self, dt_ms: f32) {
        self.scale.step(dt_ms / 1000.0);
    }

    fn update(&mut self) {
        self.scale.set_target(self.target_scale());
    }
}

impl Default for PressScale {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for PressScale {
    fn handle_event(&mut self, event: &Event) -> bool {
        match event.event_type {
            event_types::POINTER_ENTER => self.hovered = true,
            event_types::POINTER_LEAVE => {
                self.hovered = false;
                self.pressed = false;
            }
            event_types::POINTER_DOWN => self.pressed = true,
            event_types::POINTER_UP => self.pressed = false,
            _ => return false,
        }
        self.update();
        true
    }
}
