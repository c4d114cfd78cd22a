//! One-shot entrances played when an element mounts
//!
//! Unlike [`crate::reveal::ScrollReveal`] these do not wait for the element
//! to scroll into view: the host sends `MOUNT` and the element fades in
//! after its delay.

use flair_animation::{Easing, KeyframeProperties, PropertyTween};
use flair_core::{event_types, Event, EventHandler};
use serde::{Deserialize, Serialize};

use crate::config::clamp_field;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntranceKind {
    /// Text fading in while it unblurs from 10 px
    BlurText,
    /// Card fading in while rising 20 px
    #[default]
    Card,
}

impl EntranceKind {
    pub fn default_duration_ms(self) -> f32 {
        match self {
            EntranceKind::BlurText => 800.0,
            EntranceKind::Card => 400.0,
        }
    }

    pub fn hidden(self) -> KeyframeProperties {
        match self {
            EntranceKind::BlurText => KeyframeProperties::opacity(0.0).with_blur(10.0),
            EntranceKind::Card => KeyframeProperties::opacity(0.0).with_translate_y(20.0),
        }
    }

    pub fn visible(self) -> KeyframeProperties {
        match self {
            EntranceKind::BlurText => KeyframeProperties::opacity(1.0).with_blur(0.0),
            EntranceKind::Card => KeyframeProperties::opacity(1.0).with_translate_y(0.0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntranceConfig {
    pub kind: EntranceKind,
    pub delay_ms: f32,
    pub duration_ms: f32,
    pub easing: Easing,
}

impl Default for EntranceConfig {
    fn default() -> Self {
        Self::card()
    }
}

impl EntranceConfig {
    pub fn of(kind: EntranceKind) -> Self {
        Self {
            kind,
            delay_ms: 0.0,
            duration_ms: kind.default_duration_ms(),
            easing: Easing::ENTRANCE,
        }
    }

    pub fn blur_text() -> Self {
        Self::of(EntranceKind::BlurText)
    }

    pub fn card() -> Self {
        Self::of(EntranceKind::Card)
    }

    pub fn with_delay(mut self, delay_ms: f32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn sanitized(self) -> Self {
        Self {
            delay_ms: clamp_field("entrance.delay_ms", self.delay_ms, 0.0, f32::MAX),
            duration_ms: clamp_field("entrance.duration_ms", self.duration_ms, 0.0, f32::MAX),
            ..self
        }
    }
}

pub struct MountEntrance {
    config: EntranceConfig,
    tween: PropertyTween,
    played: bool,
}

impl MountEntrance {
    /// An entrance resting in its hidden state until played
    pub fn new(config: EntranceConfig) -> Self {
        let config = config.sanitized();
        let tween = PropertyTween::new(config.kind.hidden(), config.duration_ms, config.easing)
            .with_delay(config.delay_ms);
        Self {
            config,
            tween,
            played: false,
        }
    }

    pub fn config(&self) -> &EntranceConfig {
        &self.config
    }

    /// Start the entrance; returns false if it already played
    pub fn play(&mut self) -> bool {
        if self.played {
            return false;
        }
        self.played = true;
        tracing::debug!(kind = ?self.config.kind, "entrance playing");
        self.tween.retarget(self.config.kind.visible());
        true
    }

    /// Back to hidden, ready to play again
    pub fn reset(&mut self) {
        self.played = false;
        self.tween.snap_to(self.config.kind.hidden());
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

impl Default for MountEntrance {
    fn default() -> Self {
        Self::new(EntranceConfig::default())
    }
}

impl EventHandler for MountEntrance {
    fn handle_event(&mut self, event: &Event) -> bool {
        match event.event_type {
            event_types::MOUNT => self.play(),
            event_types::UNMOUNT => {
                self.reset();
                true
            }
            _ => false,
        }
    }
}
