//! Keyframe animations
//!
//! [`KeyframeProperties`] is the bundle of visual properties an effect hands
//! to the renderer. [`KeyframeTrack`] animates a single value through timed
//! keyframes with delay, looping and ping-pong playback, which is what the
//! continuous effects (blinking cursors, floating, pulse rings) are made of.

use crate::easing::Easing;
use serde::{Deserialize, Serialize};

/// Visual properties of an animated element.
///
/// `None` means "not animated"; the renderer keeps its own value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyframeProperties {
    /// Opacity (0.0 to 1.0)
    pub opacity: Option<f32>,
    /// Translation X in pixels
    pub translate_x: Option<f32>,
    /// Translation Y in pixels
    pub translate_y: Option<f32>,
    /// Uniform scale factor
    pub scale: Option<f32>,
    /// Rotation in degrees
    pub rotate: Option<f32>,
    /// Gaussian blur radius in pixels
    pub blur: Option<f32>,
}

impl KeyframeProperties {
    pub fn opacity(value: f32) -> Self {
        Self {
            opacity: Some(value),
            ..Default::default()
        }
    }

    pub fn with_opacity(mut self, value: f32) -> Self {
        self.opacity = Some(value);
        self
    }

    pub fn with_translate(mut self, x: f32, y: f32) -> Self {
        self.translate_x = Some(x);
        self.translate_y = Some(y);
        self
    }

    pub fn with_translate_x(mut self, x: f32) -> Self {
        self.translate_x = Some(x);
        self
    }

    pub fn with_translate_y(mut self, y: f32) -> Self {
        self.translate_y = Some(y);
        self
    }

    pub fn with_scale(mut self, value: f32) -> Self {
        self.scale = Some(value);
        self
    }

    pub fn with_rotate(mut self, degrees: f32) -> Self {
        self.rotate = Some(degrees);
        self
    }

    pub fn with_blur(mut self, px: f32) -> Self {
        self.blur = Some(px);
        self
    }

    /// Interpolate toward `other`. A property set on only one side holds that
    /// side's value.
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            opacity: lerp_opt(self.opacity, other.opacity, t),
            translate_x: lerp_opt(self.translate_x, other.translate_x, t),
            translate_y: lerp_opt(self.translate_y, other.translate_y, t),
            scale: lerp_opt(self.scale, other.scale, t),
            rotate: lerp_opt(self.rotate, other.rotate, t),
            blur: lerp_opt(self.blur, other.blur, t),
        }
    }

    pub fn resolved_opacity(&self) -> f32 {
        self.opacity.unwrap_or(1.0)
    }

    pub fn resolved_translate(&self) -> (f32, f32) {
        (
            self.translate_x.unwrap_or(0.0),
            self.translate_y.unwrap_or(0.0),
        )
    }

    pub fn resolved_scale(&self) -> f32 {
        self.scale.unwrap_or(1.0)
    }

    pub fn resolved_rotate(&self) -> f32 {
        self.rotate.unwrap_or(0.0)
    }

    pub fn resolved_blur(&self) -> f32 {
        self.blur.unwrap_or(0.0)
    }
}

fn lerp_opt(a: Option<f32>, b: Option<f32>, t: f32) -> Option<f32> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a + (b - a) * t),
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    }
}

/// A value at a point in time
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Keyframe {
    pub time_ms: u32,
    pub value: f32,
    /// Easing used for the segment that ends at this keyframe
    pub easing: Easing,
}

/// Playback direction of each iteration
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayDirection {
    #[default]
    Forward,
    Reverse,
    /// Forward on even iterations, reverse on odd ones
    Alternate,
}

/// Builder for [`KeyframeTrack`]
///
/// ```rust
/// use flair_animation::{Easing, KeyframeTrack};
///
/// let float = KeyframeTrack::builder()
///     .at(0, 0.0)
///     .at(1500, -10.0)
///     .at(3000, 0.0)
///     .ease(Easing::EaseInOut)
///     .loop_infinite()
///     .build();
/// assert_eq!(float.duration_ms(), 3000);
/// ```
#[derive(Clone, Debug)]
pub struct KeyframeTrackBuilder {
    points: Vec<Keyframe>,
    default_easing: Easing,
    direction: PlayDirection,
    iterations: Option<u32>,
    delay_ms: u32,
}

impl Default for KeyframeTrackBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyframeTrackBuilder {
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            default_easing: Easing::Linear,
            direction: PlayDirection::Forward,
            iterations: Some(1),
            delay_ms: 0,
        }
    }

    pub fn at(mut self, time_ms: u32, value: f32) -> Self {
        self.points.push(Keyframe {
            time_ms,
            value,
            easing: self.default_easing,
        });
        self
    }

    pub fn at_with_ease(mut self, time_ms: u32, value: f32, easing: Easing) -> Self {
        self.points.push(Keyframe {
            time_ms,
            value,
            easing,
        });
        self
    }

    /// Set the easing for every keyframe added so far and after
    pub fn ease(mut self, easing: Easing) -> Self {
        self.default_easing = easing;
        for point in &mut self.points {
            point.easing = easing;
        }
        self
    }

    pub fn ping_pong(mut self) -> Self {
        self.direction = PlayDirection::Alternate;
        self
    }

    pub fn reverse(mut self) -> Self {
        self.direction = PlayDirection::Reverse;
        self
    }

    pub fn loop_count(mut self, count: u32) -> Self {
        self.iterations = Some(count.max(1));
        self
    }

    pub fn loop_infinite(mut self) -> Self {
        self.iterations = None;
        self
    }

    pub fn delay(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn build(mut self) -> KeyframeTrack {
        self.points.sort_by_key(|p| p.time_ms);
        let duration_ms = self.points.last().map_or(0, |p| p.time_ms);

        KeyframeTrack {
            points: self.points,
            duration_ms,
            direction: self.direction,
            iterations: self.iterations,
            delay_ms: self.delay_ms,
            elapsed_ms: 0.0,
            playing: true,
        }
    }
}

/// A single value animated through keyframes.
///
/// Tracks start playing when built. Before the delay has elapsed the track
/// holds its first value; after the last iteration it holds its final value.
#[derive(Clone, Debug)]
pub struct KeyframeTrack {
    points: Vec<Keyframe>,
    duration_ms: u32,
    direction: PlayDirection,
    /// `None` loops forever
    iterations: Option<u32>,
    delay_ms: u32,
    elapsed_ms: f32,
    playing: bool,
}

impl KeyframeTrack {
    pub fn builder() -> KeyframeTrackBuilder {
        KeyframeTrackBuilder::new()
    }

    pub fn restart(&mut self) {
        self.elapsed_ms = 0.0;
        self.playing = true;
    }

    pub fn stop(&mut self) {
        self.playing = false;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    /// Whether a finite track has played all its iterations
    pub fn is_finished(&self) -> bool {
        match self.iterations {
            None => false,
            Some(count) => {
                self.elapsed_ms >= self.delay_ms as f32 + self.duration_ms as f32 * count as f32
            }
        }
    }

    /// Advance by `dt_ms` milliseconds
    pub fn tick(&mut self, dt_ms: f32) {
        if !self.playing || dt_ms <= 0.0 {
            return;
        }
        self.elapsed_ms += dt_ms;
        if self.is_finished() {
            self.playing = false;
        }
    }

    /// Current value
    pub fn value(&self) -> f32 {
        self.value_at(self.elapsed_ms)
    }

    /// Value at an absolute time since start, ignoring play state
    pub fn value_at(&self, elapsed_ms: f32) -> f32 {
        if self.points.is_empty() {
            return 0.0;
        }

        let local = elapsed_ms - self.delay_ms as f32;
        if local < 0.0 {
            return self.sample(self.oriented(0, 0.0));
        }
        if self.duration_ms == 0 {
            return self.points[self.points.len() - 1].value;
        }

        let duration = self.duration_ms as f32;
        let mut iteration = (local / duration).floor() as u32;
        let mut progress = (local % duration) / duration;

        if let Some(count) = self.iterations {
            if iteration >= count {
                iteration = count - 1;
                progress = 1.0;
            }
        }

        self.sample(self.oriented(iteration, progress))
    }

    fn oriented(&self, iteration: u32, progress: f32) -> f32 {
        let reversed = match self.direction {
            PlayDirection::Forward => false,
            PlayDirection::Reverse => true,
            PlayDirection::Alternate => iteration % 2 == 1,
        };
        if reversed {
            1.0 - progress
        } else {
            progress
        }
    }

    /// Sample the keyframes at normalized progress
    fn sample(&self, progress: f32) -> f32 {
        let time = progress.clamp(0.0, 1.0) * self.duration_ms as f32;

        let next = self
            .points
            .iter()
            .position(|p| p.time_ms as f32 >= time)
            .unwrap_or(self.points.len() - 1);
        if next == 0 {
            return self.points[0].value;
        }

        let (from, to) = (&self.points[next - 1], &self.points[next]);
        let span = (to.time_ms - from.time_ms) as f32;
        if span <= 0.0 {
            return to.value;
        }

        let local = (time - from.time_ms as f32) / span;
        from.value + (to.value - from.value) * to.easing.apply(local)
    }
}
