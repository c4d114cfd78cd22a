//! Animation presets
//!
//! Entrance variants are a closed set: each [`RevealVariant`] maps to a fixed
//! pair of hidden/visible property bundles. Looping presets build the
//! [`KeyframeTrack`]s behind the continuous effects.

use crate::easing::Easing;
use crate::keyframe::{KeyframeProperties, KeyframeTrack};
use serde::{Deserialize, Serialize};

/// Which way content travels while it enters
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlideDirection {
    /// Rises from below
    #[default]
    Up,
    /// Drops from above
    Down,
    /// Comes in from the right, moving left
    Left,
    /// Comes in from the left, moving right
    Right,
    /// Fade only
    None,
}

/// Hidden/visible presentation pairs for entrance animations
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealVariant {
    /// Fade while translating `distance` pixels
    Slide(SlideDirection),
    /// Fade while scaling up from `from_scale`
    Scale { from_scale: f32 },
    /// Fade while unblurring from `radius` pixels
    Blur { radius: f32 },
}

impl Default for RevealVariant {
    fn default() -> Self {
        RevealVariant::Slide(SlideDirection::Up)
    }
}

impl RevealVariant {
    pub const SCALE: RevealVariant = RevealVariant::Scale { from_scale: 0.8 };
    pub const BLUR: RevealVariant = RevealVariant::Blur { radius: 10.0 };

    /// Properties before the element is revealed
    pub fn hidden(&self, distance: f32) -> KeyframeProperties {
        let faded = KeyframeProperties::opacity(0.0);
        match *self {
            RevealVariant::Slide(direction) => match direction {
                SlideDirection::Up => faded.with_translate_y(distance),
                SlideDirection::Down => faded.with_translate_y(-distance),
                SlideDirection::Left => faded.with_translate_x(distance),
                SlideDirection::Right => faded.with_translate_x(-distance),
                SlideDirection::None => faded,
            },
            RevealVariant::Scale { from_scale } => faded.with_scale(from_scale),
            RevealVariant::Blur { radius } => faded.with_blur(radius),
        }
    }

    /// Properties once the element is revealed
    pub fn visible(&self) -> KeyframeProperties {
        let shown = KeyframeProperties::opacity(1.0);
        match *self {
            RevealVariant::Slide(SlideDirection::None) => shown,
            RevealVariant::Slide(_) => shown.with_translate(0.0, 0.0),
            RevealVariant::Scale { .. } => shown.with_scale(1.0),
            RevealVariant::Blur { .. } => shown.with_blur(0.0),
        }
    }
}

/// Builders for the looping tracks used by continuous effects
pub struct AnimationPreset;

impl AnimationPreset {
    /// Text cursor opacity: 1 -> 0 -> 1 every `2 * half_period_ms`
    pub fn cursor_blink(half_period_ms: u32) -> KeyframeTrack {
        KeyframeTrack::builder()
            .at(0, 1.0)
            .at(half_period_ms, 0.0)
            .ping_pong()
            .loop_infinite()
            .build()
    }

    /// Vertical bob: 0 -> -distance -> 0, ease-in-out, forever
    pub fn float(duration_ms: u32, distance: f32, delay_ms: u32) -> KeyframeTrack {
        KeyframeTrack::builder()
            .at(0, 0.0)
            .at(duration_ms / 2, -distance)
            .at(duration_ms, 0.0)
            .ease(Easing::EaseInOut)
            .delay(delay_ms)
            .loop_infinite()
            .build()
    }

    /// Expanding ring scale: 0.5 -> 2, ease-out, forever
    pub fn pulse_scale(duration_ms: u32, delay_ms: u32) -> KeyframeTrack {
        KeyframeTrack::builder()
            .at(0, 0.5)
            .at(duration_ms, 2.0)
            .ease(Easing::EaseOut)
            .delay(delay_ms)
            .loop_infinite()
            .build()
    }

    /// Expanding ring opacity: 1 -> 0, ease-out, forever
    pub fn pulse_opacity(duration_ms: u32, delay_ms: u32) -> KeyframeTrack {
        KeyframeTrack::builder()
            .at(0, 1.0)
            .at(duration_ms, 0.0)
            .ease(Easing::EaseOut)
            .delay(delay_ms)
            .loop_infinite()
            .build()
    }

    /// Linear sweep `from -> to` every `duration_ms`, forever
    pub fn linear_loop(duration_ms: u32, from: f32, to: f32) -> KeyframeTrack {
        KeyframeTrack::builder()
            .at(0, from)
            .at(duration_ms, to)
            .loop_infinite()
            .build()
    }

    /// Linear `from -> peak -> from` every `duration_ms`, forever
    pub fn linear_round_trip(duration_ms: u32, from: f32, peak: f32) -> KeyframeTrack {
        KeyframeTrack::builder()
            .at(0, from)
            .at(duration_ms / 2, peak)
            .at(duration_ms, from)
            .loop_infinite()
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slide_variants() {
        let up = RevealVariant::Slide(SlideDirection::Up).hidden(50.0);
        assert_eq!(up.opacity, Some(0.0));
        assert_eq!(up.translate_y, Some(50.0));

        let right = RevealVariant::Slide(SlideDirection::Right).hidden(30.0);
        assert_eq!(right.translate_x, Some(-30.0));

        let none = RevealVariant::Slide(SlideDirection::None).hidden(30.0);
        assert_eq!(none.resolved_translate(), (0.0, 0.0));
    }

    #[test]
    fn test_visible_states_are_neutral() {
        for variant in [
            RevealVariant::default(),
            RevealVariant::SCALE,
            RevealVariant::BLUR,
            RevealVariant::Slide(SlideDirection::Left),
        ] {
            let visible = variant.visible();
            assert_eq!(visible.resolved_opacity(), 1.0);
            assert_eq!(visible.resolved_translate(), (0.0, 0.0));
            assert_eq!(visible.resolved_scale(), 1.0);
            assert_eq!(visible.resolved_blur(), 0.0);
        }
    }

    #[test]
    fn test_cursor_blink() {
        let track = AnimationPreset::cursor_blink(500);
        assert_eq!(track.value_at(0.0), 1.0);
        assert!((track.value_at(250.0) - 0.5).abs() < 1e-4);
        assert!((track.value_at(1000.0) - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_float_peak() {
        let track = AnimationPreset::float(3000, 10.0, 0);
        assert_eq!(track.value_at(1500.0), -10.0);
        assert!(track.value_at(750.0) < 0.0);
    }
}
