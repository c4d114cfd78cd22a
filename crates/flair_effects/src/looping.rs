//! Continuously repeating decorations
//!
//! Pulse rings, floating elements and the looping background sweeps behind
//! animated borders, gradient text, shimmer buttons and glowing buttons.
//! All of them are infinite [`KeyframeTrack`]s advanced by `tick`.

use flair_animation::{AnimationPreset, KeyframeTrack};
use serde::{Deserialize, Serialize};

use crate::config::clamp_ms;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PulseRingConfig {
    /// Diameter of each ring at scale 1
    pub size_px: f32,
    pub duration_ms: u32,
    pub rings: usize,
    pub color: String,
}

impl Default for PulseRingConfig {
    fn default() -> Self {
        Self {
            size_px: 100.0,
            duration_ms: 2000,
            rings: 3,
            color: "var(--primary)".to_string(),
        }
    }
}

impl PulseRingConfig {
    pub fn sanitized(self) -> Self {
        Self {
            duration_ms: clamp_ms("pulse_ring.duration_ms", self.duration_ms),
            size_px: self.size_px.max(0.0),
            rings: self.rings.clamp(1, 8),
            ..self
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingFrame {
    pub scale: f32,
    pub opacity: f32,
}

/// Concentric rings expanding and fading out, staggered evenly over one period
pub struct PulseRing {
    config: PulseRingConfig,
    rings: Vec<(KeyframeTrack, KeyframeTrack)>,
}

impl PulseRing {
    pub fn new(config: PulseRingConfig) -> Self {
        let config = config.sanitized();
        let step = config.duration_ms / config.rings as u32;
        let rings = (0..config.rings as u32)
            .map(|i| {
                (
                    AnimationPreset::pulse_scale(config.duration_ms, i * step),
                    AnimationPreset::pulse_opacity(config.duration_ms, i * step),
                )
            })
            .collect();
        Self { config, rings }
    }

    pub fn config(&self) -> &PulseRingConfig {
        &self.config
    }

    /// Diameter of the solid dot at the center
    pub fn core_size(&self) -> f32 {
        self.config.size_px / 4.0
    }

    pub fn tick(&mut self, dt_ms: f32) {
        for (scale, opacity) in &mut self.rings {
            scale.tick(dt_ms);
            opacity.tick(dt_ms);
        }
    }

    pub fn rings(&self) -> impl Iterator<Item = RingFrame> + '_ {
        self.rings.iter().map(|(scale, opacity)| RingFrame {
            scale: scale.value(),
            opacity: opacity.value(),
        })
    }
}

impl Default for PulseRing {
    fn default() -> Self {
        Self::new(PulseRingConfig::default())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloatingConfig {
    pub duration_ms: u32,
    /// Peak upward travel in pixels
    pub distance: f32,
    pub delay_ms: u32,
}

impl Default for FloatingConfig {
    fn default() -> Self {
        Self {
            duration_ms: 3000,
            distance: 10.0,
            delay_ms: 0,
        }
    }
}

impl FloatingConfig {
    pub fn sanitized(self) -> Self {
        Self {
            duration_ms: clamp_ms("floating.duration_ms", self.duration_ms),
            ..self
        }
    }
}

/// Gentle vertical bob
pub struct FloatingElement {
    track: KeyframeTrack,
}

impl FloatingElement {
    pub fn new(config: FloatingConfig) -> Self {
        let config = config.sanitized();
        Self {
            track: AnimationPreset::float(config.duration_ms, config.distance, config.delay_ms),
        }
    }

    pub fn tick(&mut self, dt_ms: f32) {
        self.track.tick(dt_ms);
    }

    pub fn offset_y(&self) -> f32 {
        self.track.value()
    }
}

impl Default for FloatingElement {
    fn default() -> Self {
        Self::new(FloatingConfig::default())
    }
}

/// Background sweeps that repeat forever
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopKind {
    /// Conic border gradient angle, 0 -> 360 degrees
    RotatingBorder,
    /// Background position, 0 -> 200 percent
    GradientShift,
    /// Highlight position, 200 -> -200 percent
    Shimmer,
    /// Gradient overlay position, 0 -> 100 -> 0 percent
    GlowOverlay,
}

impl LoopKind {
    pub fn default_duration_ms(self) -> u32 {
        match self {
            LoopKind::RotatingBorder | LoopKind::GradientShift => 3000,
            LoopKind::Shimmer => 2000,
            LoopKind::GlowOverlay => 5000,
        }
    }

    fn track(self, duration_ms: u32) -> KeyframeTrack {
        match self {
            LoopKind::RotatingBorder => AnimationPreset::linear_loop(duration_ms, 0.0, 360.0),
            LoopKind::GradientShift => AnimationPreset::linear_loop(duration_ms, 0.0, 200.0),
            LoopKind::Shimmer => AnimationPreset::linear_loop(duration_ms, 200.0, -200.0),
            LoopKind::GlowOverlay => AnimationPreset::linear_round_trip(duration_ms, 0.0, 100.0),
        }
    }
}

pub struct ContinuousLoop {
    kind: LoopKind,
    track: KeyframeTrack,
}

impl ContinuousLoop {
    pub fn new(kind: LoopKind) -> Self {
        Self::with_duration(kind, kind.default_duration_ms())
    }

    pub fn with_duration(kind: LoopKind, duration_ms: u32) -> Self {
        Self {
            kind,
            track: kind.track(duration_ms.max(2)),
        }
    }

    pub fn kind(&self) -> LoopKind {
        self.kind
    }

    pub fn tick(&mut self, dt_ms: f32) {
        self.track.tick(dt_ms);
    }

    /// Degrees for [`LoopKind::RotatingBorder`], percent otherwise
    pub fn value(&self) -> f32 {
        self.track.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rings_are_offset_by_a_third() {
        let mut pulse = PulseRing::default();
        let start: Vec<RingFrame> = pulse.rings().collect();
        assert_eq!(start.len(), 3);
        assert!(start.iter().all(|r| r.scale == 0.5 && r.opacity == 1.0));

        pulse.tick(1000.0);
        let frames: Vec<RingFrame> = pulse.rings().collect();
        assert!(frames[0].scale > frames[1].scale);
        assert!(frames[1].scale > 0.5);
        assert_eq!(frames[2].scale, 0.5);
        assert_eq!(pulse.core_size(), 25.0);
    }

    #[test]
    fn test_floating_bob() {
        let mut float = FloatingElement::default();
        float.tick(1500.0);
        assert!((float.offset_y() + 10.0).abs() < 1e-4);
        float.tick(1500.0);
        assert!(float.offset_y().abs() < 1e-4);
    }

    #[test]
    fn test_loops_sweep_their_range() {
        let mut border = ContinuousLoop::new(LoopKind::RotatingBorder);
        border.tick(1500.0);
        assert!((border.value() - 180.0).abs() < 1e-3);

        let mut shimmer = ContinuousLoop::new(LoopKind::Shimmer);
        shimmer.tick(1000.0);
        assert!(shimmer.value().abs() < 1e-3);
        // wraps: 500 ms into the second sweep
        shimmer.tick(1500.0);
        assert!((shimmer.value() - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_glow_overlay_pans_there_and_back() {
        let mut overlay = ContinuousLoop::new(LoopKind::GlowOverlay);
        assert_eq!(overlay.value(), 0.0);
        overlay.tick(1250.0);
        assert!((overlay.value() - 50.0).abs() < 1e-3);
        overlay.tick(1250.0);
        assert!((overlay.value() - 100.0).abs() < 1e-3);
        overlay.tick(1250.0);
        assert!((overlay.value() - 50.0).abs() < 1e-3);
        overlay.tick(2500.0);
        assert!((overlay.value() - 50.0).abs() < 1e-3);
    }
}
