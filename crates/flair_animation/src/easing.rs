//! Easing functions for animations

use serde::{Deserialize, Serialize};

/// Easing curve applied to a normalized progress value
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    EaseOutQuart,
    /// CSS `cubic-bezier(x1, y1, x2, y2)`
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// The decelerating curve used by every scroll/text entrance:
    /// `cubic-bezier(0.25, 0.46, 0.45, 0.94)`.
    pub const ENTRANCE: Easing = Easing::CubicBezier(0.25, 0.46, 0.45, 0.94);

    /// Apply the easing function to a progress value.
    ///
    /// Input is clamped to `[0, 1]`, so callers can pass raw
    /// `elapsed / duration` ratios.
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Easing::Linear => t,
            Easing::EaseIn | Easing::EaseInCubic => t * t * t,
            Easing::EaseOut | Easing::EaseOutCubic => ease_out_cubic(t),
            Easing::EaseInOut | Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::EaseInQuad => t * t,
            Easing::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::EaseOutQuart => 1.0 - (1.0 - t).powi(4),
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier(t, x1, y1, x2, y2),
        }
    }
}

/// `1 - (1 - t)^3`, the counter and hover deceleration curve
#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// [`ease_out_cubic`] in f64, for values that must keep rising until `t == 1`
#[inline]
pub fn ease_out_cubic_f64(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Solve a CSS cubic bezier for `x = t` and return its `y`.
///
/// Newton-Raphson first, bisection when the slope is too flat to trust.
/// Works in f64 to keep per-frame sampling free of jitter.
fn cubic_bezier(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let curve_x = BezierAxis::new(x1 as f64, x2 as f64);
    let curve_y = BezierAxis::new(y1 as f64, y2 as f64);
    let target = t as f64;

    let mut p = target;
    for _ in 0..8 {
        let err = curve_x.sample(p) - target;
        if err.abs() < 1e-7 {
            return curve_y.sample(p) as f32;
        }
        let slope = curve_x.slope(p);
        if slope.abs() < 1e-7 {
            break;
        }
        p -= err / slope;
    }

    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    p = target;
    for _ in 0..24 {
        let value = curve_x.sample(p);
        if (value - target).abs() < 1e-7 {
            break;
        }
        if value < target {
            lo = p;
        } else {
            hi = p;
        }
        p = (lo + hi) * 0.5;
    }

    curve_y.sample(p) as f32
}

/// One axis of a bezier from (0,0) to (1,1), kept in polynomial form
struct BezierAxis {
    a: f64,
    b: f64,
    c: f64,
}

impl BezierAxis {
    fn new(p1: f64, p2: f64) -> Self {
        Self {
            a: 1.0 - 3.0 * p2 + 3.0 * p1,
            b: 3.0 * p2 - 6.0 * p1,
            c: 3.0 * p1,
        }
    }

    #[inline]
    fn sample(&self, t: f64) -> f64 {
        ((self.a * t + self.b) * t + self.c) * t
    }

    #[inline]
    fn slope(&self, t: f64) -> f64 {
        (3.0 * self.a * t + 2.0 * self.b) * t + self.c
    }
}
