//! Retargetable property transitions
//!
//! A [`PropertyTween`] moves a [`KeyframeProperties`] bundle from where it
//! currently is to a new target. Retargeting mid-flight starts the next
//! transition from the current interpolated value, so toggling a hover or a
//! reveal back and forth never jumps.

use crate::easing::Easing;
use crate::keyframe::KeyframeProperties;

#[derive(Clone, Debug)]
pub struct PropertyTween {
    from: KeyframeProperties,
    to: KeyframeProperties,
    duration_ms: f32,
    delay_ms: f32,
    easing: Easing,
    elapsed_ms: f32,
}

impl PropertyTween {
    /// A tween resting at `initial`; nothing plays until the first retarget
    pub fn new(initial: KeyframeProperties, duration_ms: f32, easing: Easing) -> Self {
        Self {
            from: initial,
            to: initial,
            duration_ms: duration_ms.max(0.0),
            delay_ms: 0.0,
            easing,
            elapsed_ms: f32::INFINITY,
        }
    }

    pub fn with_delay(mut self, delay_ms: f32) -> Self {
        self.delay_ms = delay_ms.max(0.0);
        self
    }

    pub fn target(&self) -> &KeyframeProperties {
        &self.to
    }

    pub fn duration_ms(&self) -> f32 {
        self.duration_ms
    }

    pub fn delay_ms(&self) -> f32 {
        self.delay_ms
    }

    /// Start moving toward `target` from the current value
    pub fn retarget(&mut self, target: KeyframeProperties) {
        self.from = self.current();
        self.to = target;
        self.elapsed_ms = 0.0;
    }

    /// Jump straight to `value`
    pub fn snap_to(&mut self, value: KeyframeProperties) {
        self.from = value;
        self.to = value;
        self.elapsed_ms = f32::INFINITY;
    }

    pub fn tick(&mut self, dt_ms: f32) {
        if dt_ms > 0.0 && !self.is_finished() {
            self.elapsed_ms += dt_ms;
        }
    }

    /// Eased progress of the current transition (0.0 to 1.0)
    pub fn progress(&self) -> f32 {
        let local = self.elapsed_ms - self.delay_ms;
        if local <= 0.0 {
            return if self.duration_ms == 0.0 && self.delay_ms == 0.0 {
                1.0
            } else {
                0.0
            };
        }
        if self.duration_ms == 0.0 {
            return 1.0;
        }
        (local / self.duration_ms).min(1.0)
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    pub fn current(&self) -> KeyframeProperties {
        let t = self.progress();
        if t >= 1.0 {
            return self.to;
        }
        self.from.lerp(&self.to, self.easing.apply(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tween_runs_to_target() {
        let mut tween = PropertyTween::new(KeyframeProperties::opacity(0.0), 300.0, Easing::Linear);
        tween.retarget(KeyframeProperties::opacity(1.0));

        tween.tick(150.0);
        assert_eq!(tween.current().opacity, Some(0.5));
        tween.tick(200.0);
        assert!(tween.is_finished());
        assert_eq!(tween.current().opacity, Some(1.0));
    }

    #[test]
    fn test_retarget_starts_from_current_value() {
        let mut tween = PropertyTween::new(KeyframeProperties::opacity(0.0), 100.0, Easing::Linear);
        tween.retarget(KeyframeProperties::opacity(1.0));
        tween.tick(40.0);
        tween.retarget(KeyframeProperties::opacity(0.0));

        assert!((tween.current().opacity.unwrap() - 0.4).abs() < 1e-5);
        tween.tick(50.0);
        assert!((tween.current().opacity.unwrap() - 0.2).abs() < 1e-5);
    }

    #[test]
    fn test_delay() {
        let mut tween = PropertyTween::new(KeyframeProperties::opacity(0.0), 100.0, Easing::Linear)
            .with_delay(200.0);
        tween.retarget(KeyframeProperties::opacity(1.0));
        tween.tick(150.0);
        assert_eq!(tween.current().opacity, Some(0.0));
        tween.tick(100.0);
        assert_eq!(tween.current().opacity, Some(0.5));
    }

    #[test]
    fn test_new_tween_is_at_rest() {
        let mut tween = PropertyTween::new(KeyframeProperties::opacity(0.3), 100.0, Easing::Linear)
            .with_delay(50.0);
        assert!(tween.is_finished());
        tween.tick(10.0);
        assert_eq!(tween.current().opacity, Some(0.3));
    }

    #[test]
    fn test_zero_duration_is_immediate() {
        let mut tween = PropertyTween::new(KeyframeProperties::opacity(0.0), 0.0, Easing::Linear);
        tween.retarget(KeyframeProperties::opacity(1.0));
        assert!(tween.is_finished());
        assert_eq!(tween.current().opacity, Some(1.0));
    }
}
