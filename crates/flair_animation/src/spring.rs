//! Spring physics
//!
//! Damped harmonic oscillators integrated with RK4. Pointer-following effects
//! set a new target on every pointer move and step the spring every frame, so
//! the visual transform lags and settles instead of jumping.

use flair_core::Point;
use serde::{Deserialize, Serialize};

/// Displacement below which a spring counts as at rest
const REST_DELTA: f32 = 0.001;
/// Speed below which a spring counts as at rest
const REST_SPEED: f32 = 0.001;
/// Largest integration step; longer frames are split into substeps
const MAX_STEP: f32 = 1.0 / 120.0;
/// Longest frame a single step accounts for, in seconds
pub const MAX_FRAME_DT: f32 = 0.1;

/// Physical parameters of a spring
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::new(170.0, 26.0, 1.0)
    }
}

impl SpringConfig {
    pub const fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// Tilt cards: quick, nearly critically damped
    pub const fn tilt() -> Self {
        Self::new(300.0, 30.0, 1.0)
    }

    /// Magnetic elements: loose with visible overshoot
    pub const fn magnetic() -> Self {
        Self::new(150.0, 15.0, 1.0)
    }

    /// Icon rotation on hover
    pub const fn icon() -> Self {
        Self::new(300.0, 20.0, 1.0)
    }

    pub const fn stiff() -> Self {
        Self::new(400.0, 30.0, 1.0)
    }

    pub const fn snappy() -> Self {
        Self::new(300.0, 20.0, 1.0)
    }

    pub const fn gentle() -> Self {
        Self::new(120.0, 14.0, 1.0)
    }

    pub const fn wobbly() -> Self {
        Self::new(180.0, 12.0, 1.0)
    }

    /// Replace non-physical values (zero or negative) with usable ones
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        Self {
            stiffness: if self.stiffness > 0.0 {
                self.stiffness
            } else {
                defaults.stiffness
            },
            damping: self.damping.max(0.0),
            mass: if self.mass > 0.0 { self.mass } else { 1.0 },
        }
    }
}

/// A single animated value driven by a spring
#[derive(Clone, Copy, Debug)]
pub struct Spring {
    config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
}

impl Spring {
    /// Create a spring resting at `initial`
    pub fn new(config: SpringConfig, initial: f32) -> Self {
        Self {
            config: config.sanitized(),
            value: initial,
            velocity: 0.0,
            target: initial,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn config(&self) -> SpringConfig {
        self.config
    }

    /// Retarget the spring; current velocity is kept so motion stays continuous
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Jump to `value` and stop
    pub fn snap_to(&mut self, value: f32) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
    }

    pub fn is_settled(&self) -> bool {
        (self.value - self.target).abs() < REST_DELTA && self.velocity.abs() < REST_SPEED
    }

    /// Advance by `dt` seconds, at most [`MAX_FRAME_DT`] per call.
    ///
    /// Non-finite or non-positive `dt` is ignored.
    pub fn step(&mut self, dt: f32) {
        if !dt.is_finite() || dt <= 0.0 || self.is_settled() {
            return;
        }
        let dt = dt.min(MAX_FRAME_DT);

        let steps = (dt / MAX_STEP).ceil().max(1.0) as u32;
        let h = dt / steps as f32;
        for _ in 0..steps {
            self.rk4(h);
        }

        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
            tracing::trace!(target = self.target, "spring settled");
        }
    }

    fn acceleration(&self, x: f32, v: f32) -> f32 {
        let SpringConfig {
            stiffness,
            damping,
            mass,
        } = self.config;
        (-stiffness * (x - self.target) - damping * v) / mass
    }

    fn rk4(&mut self, h: f32) {
        let (x, v) = (self.value, self.velocity);

        let k1x = v;
        let k1v = self.acceleration(x, v);
        let k2x = v + 0.5 * h * k1v;
        let k2v = self.acceleration(x + 0.5 * h * k1x, k2x);
        let k3x = v + 0.5 * h * k2v;
        let k3v = self.acceleration(x + 0.5 * h * k2x, k3x);
        let k4x = v + h * k3v;
        let k4v = self.acceleration(x + h * k3x, k4x);

        self.value = x + h / 6.0 * (k1x + 2.0 * k2x + 2.0 * k3x + k4x);
        self.velocity = v + h / 6.0 * (k1v + 2.0 * k2v + 2.0 * k3v + k4v);
    }
}

/// Two springs sharing one config, for 2D offsets
#[derive(Clone, Copy, Debug)]
pub struct SpringPoint {
    x: Spring,
    y: Spring,
}

impl SpringPoint {
    pub fn new(config: SpringConfig, initial: Point) -> Self {
        Self {
            x: Spring::new(config, initial.x),
            y: Spring::new(config, initial.y),
        }
    }

    pub fn value(&self) -> Point {
        Point::new(self.x.value(), self.y.value())
    }

    pub fn target(&self) -> Point {
        Point::new(self.x.target(), self.y.target())
    }

    pub fn set_target(&mut self, target: Point) {
        self.x.set_target(target.x);
        self.y.set_target(target.y);
    }

    pub fn snap_to(&mut self, value: Point) {
        self.x.snap_to(value.x);
        self.y.snap_to(value.y);
    }

    pub fn step(&mut self, dt: f32) {
        self.x.step(dt);
        self.y.step(dt);
    }

    pub fn is_settled(&self) -> bool {
        self.x.is_settled() && self.y.is_settled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spring_at_rest_does_not_move() {
        let mut spring = Spring::new(SpringConfig::tilt(), 5.0);
        assert!(spring.is_settled());
        spring.step(1.0 / 60.0);
        assert_eq!(spring.value(), 5.0);
    }

    #[test]
    fn test_spring_reaches_target() {
        let mut spring = Spring::new(SpringConfig::tilt(), 0.0);
        spring.set_target(100.0);
        assert!(!spring.is_settled());

        for _ in 0..180 {
            spring.step(1.0 / 60.0);
        }

        assert!(spring.is_settled());
        assert_eq!(spring.value(), 100.0);
    }

    #[test]
    fn test_underdamped_spring_overshoots() {
        let mut spring = Spring::new(SpringConfig::wobbly(), 0.0);
        spring.set_target(1.0);

        let mut max = 0.0f32;
        for _ in 0..120 {
            spring.step(1.0 / 60.0);
            max = max.max(spring.value());
        }
        assert!(max > 1.0);
    }

    #[test]
    fn test_large_dt_is_stable() {
        let mut spring = Spring::new(SpringConfig::stiff(), 0.0);
        spring.set_target(10.0);
        for _ in 0..5 {
            spring.step(MAX_FRAME_DT);
        }
        assert!(spring.value().is_finite());
        assert!((spring.value() - 10.0).abs() < 1.0);
    }

    #[test]
    fn test_bad_and_long_frames() {
        let mut spring = Spring::new(SpringConfig::stiff(), 0.0);
        spring.set_target(10.0);
        spring.step(f32::NAN);
        spring.step(f32::INFINITY);
        assert_eq!(spring.value(), 0.0);
        assert_eq!(spring.velocity(), 0.0);

        let mut capped = spring;
        spring.step(MAX_FRAME_DT);
        capped.step(3600.0);
        assert_eq!(capped.value(), spring.value());
        assert_eq!(capped.velocity(), spring.velocity());
    }

    #[test]
    fn test_snap_to_stops_motion() {
        let mut spring = Spring::new(SpringConfig::magnetic(), 0.0);
        spring.set_target(20.0);
        spring.step(1.0 / 60.0);
        spring.snap_to(0.0);
        assert!(spring.is_settled());
        assert_eq!(spring.velocity(), 0.0);
    }

    #[test]
    fn test_sanitized_config() {
        let config = SpringConfig::new(-5.0, -1.0, 0.0).sanitized();
        assert!(config.stiffness > 0.0);
        assert_eq!(config.damping, 0.0);
        assert_eq!(config.mass, 1.0);
    }

    #[test]
    fn test_spring_point_settles_on_both_axes() {
        let mut point = SpringPoint::new(SpringConfig::tilt(), Point::ZERO);
        point.set_target(Point::new(0.5, -0.5));
        for _ in 0..240 {
            point.step(1.0 / 60.0);
        }
        assert!(point.is_settled());
        assert_eq!(point.value(), Point::new(0.5, -0.5));
    }
}
