//! Scroll-triggered reveal
//!
//! A two-state machine (hidden, visible) fed by the element's visible ratio.
//! Entering the view past the threshold reveals the element; in
//! [`RevealTrigger::Once`] mode it then stays revealed, in
//! [`RevealTrigger::Repeat`] mode it hides again on leaving.

use flair_animation::{Easing, KeyframeProperties, PropertyTween, RevealVariant};
use flair_core::fsm::StateMachine;
use flair_core::{event_types, Event, EventData, EventHandler, Rect, StateId};
use serde::{Deserialize, Serialize};

use crate::config::clamp_field;

pub mod states {
    use flair_core::StateId;

    pub const HIDDEN: StateId = 0;
    pub const VISIBLE: StateId = 1;
}

pub mod reveal_events {
    use flair_core::EventId;

    pub const ENTER_VIEW: EventId = 1;
    pub const EXIT_VIEW: EventId = 2;
}

/// Fraction of `element` inside `viewport`, in `[0, 1]`
pub fn visible_ratio(element: &Rect, viewport: &Rect) -> f32 {
    if element.is_empty() {
        return 0.0;
    }
    match element.intersection(viewport) {
        Some(overlap) => (overlap.area() / element.area()).clamp(0.0, 1.0),
        None => 0.0,
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealTrigger {
    /// Reveal the first time the element is seen, never hide again
    #[default]
    Once,
    /// Follow visibility in both directions
    Repeat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealState {
    Hidden,
    Visible,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollRevealConfig {
    pub variant: RevealVariant,
    pub delay_ms: f32,
    pub duration_ms: f32,
    /// Slide distance in pixels
    pub distance: f32,
    pub trigger: RevealTrigger,
    /// Visible ratio required to count as in view
    pub threshold: f32,
    pub easing: Easing,
}

impl Default for ScrollRevealConfig {
    fn default() -> Self {
        Self {
            variant: RevealVariant::default(),
            delay_ms: 0.0,
            duration_ms: 500.0,
            distance: 50.0,
            trigger: RevealTrigger::Once,
            threshold: 0.1,
            easing: Easing::ENTRANCE,
        }
    }
}

impl ScrollRevealConfig {
    /// Fade in while scaling up from 0.8
    pub fn scale() -> Self {
        Self {
            variant: RevealVariant::SCALE,
            threshold: 0.3,
            ..Self::default()
        }
    }

    /// Fade in while unblurring from 10 px
    pub fn blur() -> Self {
        Self {
            variant: RevealVariant::BLUR,
            threshold: 0.3,
            duration_ms: 600.0,
            easing: Easing::EaseOut,
            ..Self::default()
        }
    }

    pub fn sanitized(self) -> Self {
        Self {
            delay_ms: clamp_field("reveal.delay_ms", self.delay_ms, 0.0, f32::MAX),
            duration_ms: clamp_field("reveal.duration_ms", self.duration_ms, 0.0, f32::MAX),
            distance: clamp_field("reveal.distance", self.distance, 0.0, f32::MAX),
            threshold: clamp_field("reveal.threshold", self.threshold, 0.0, 1.0),
            ..self
        }
    }
}

pub struct ScrollReveal {
    config: ScrollRevealConfig,
    fsm: StateMachine,
    tween: PropertyTween,
}

impl ScrollReveal {
    pub fn new(config: ScrollRevealConfig) -> Self {
        let config = config.sanitized();

        let mut builder = StateMachine::builder(states::HIDDEN).on(
            states::HIDDEN,
            reveal_events::ENTER_VIEW,
            states::VISIBLE,
        );
        if config.trigger == RevealTrigger::Repeat {
            builder = builder.on(states::VISIBLE, reveal_events::EXIT_VIEW, states::HIDDEN);
        }

        let tween = PropertyTween::new(
            config.variant.hidden(config.distance),
            config.duration_ms,
            config.easing,
        )
        .with_delay(config.delay_ms);

        Self {
            config,
            fsm: builder.build(),
            tween,
        }
    }

    pub fn config(&self) -> &ScrollRevealConfig {
        &self.config
    }

    pub fn state(&self) -> RevealState {
        if self.fsm.is_in(states::VISIBLE) {
            RevealState::Visible
        } else {
            RevealState::Hidden
        }
    }

    pub fn is_visible(&self) -> bool {
        self.state() == RevealState::Visible
    }

    /// Feed the element's current visible ratio; returns true on a state change
    pub fn set_visible_ratio(&mut self, ratio: f32) -> bool {
        let in_view = ratio > 0.0 && ratio >= self.config.threshold;
        let event = if in_view {
            reveal_events::ENTER_VIEW
        } else {
            reveal_events::EXIT_VIEW
        };

        let before = self.fsm.current_state();
        let after = self.fsm.send(event);
        if before == after {
            return false;
        }

        tracing::debug!(ratio, state = ?self.state(), "reveal state changed");
        self.tween.retarget(self.properties_for(after));
        true
    }

    /// Measure `element` against `viewport` and feed the ratio
    pub fn observe(&mut self, element: &Rect, viewport: &Rect) -> bool {
        self.set_visible_ratio(visible_ratio(element, viewport))
    }

    pub fn tick(&mut self, dt_ms: f32) {
        self.tween.tick(dt_ms);
    }

    pub fn is_animating(&self) -> bool {
        !self.tween.is_finished()
    }

    /// Presentation properties at the current point of the transition
    pub fn properties(&self) -> KeyframeProperties {
        self.tween.current()
    }

    /// Back to hidden with no transition
    pub fn reset(&mut self) {
        self.fsm.reset();
        self.tween
            .snap_to(self.config.variant.hidden(self.config.distance));
    }

    fn properties_for(&self, state: StateId) -> KeyframeProperties {
        if state == states::VISIBLE {
            self.config.variant.visible()
        } else {
            self.config.variant.hidden(self.config.distance)
        }
    }
}

impl Default for ScrollReveal {
    fn default() -> Self {
        Self::new(ScrollRevealConfig::default())
    }
}

impl EventHandler for ScrollReveal {
    fn handle_event(&mut self, event: &Event) -> bool {
        match (event.event_type, &event.data) {
            (event_types::VISIBILITY, EventData::Visibility { ratio }) => {
                self.set_visible_ratio(*ratio)
            }
            (event_types::UNMOUNT, _) => {
                self.reset();
                true
            }
            _ => false,
        }
    }
}
