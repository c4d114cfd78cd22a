//! Effects configuration (flair.toml)
//!
//! One table per effect. Every field has a default, so an empty file is a
//! valid configuration and a file only needs to name what it changes:
//!
//! ```toml
//! [tilt]
//! max_tilt_deg = 15.0
//!
//! [reveal]
//! trigger = "repeat"
//! variant = { slide = "left" }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::counter::CounterConfig;
use crate::error::{EffectsError, Result};
use crate::looping::{FloatingConfig, PulseRingConfig};
use crate::magnetic::MagneticConfig;
use crate::orbit::OrbitConfig;
use crate::reveal::ScrollRevealConfig;
use crate::ripple::RippleConfig;
use crate::scroll::{ParallaxConfig, ScrollProgressConfig};
use crate::spotlight::SpotlightConfig;
use crate::stagger::{StaggerRevealConfig, TextRevealConfig};
use crate::tilt::TiltConfig;
use crate::typewriter::TypewriterConfig;

/// Default file name looked up by [`EffectsConfig::load_from_dir`]
pub const CONFIG_FILE_NAME: &str = "flair.toml";

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EffectsConfig {
    pub tilt: TiltConfig,
    pub magnetic: MagneticConfig,
    pub spotlight: SpotlightConfig,
    pub scroll_progress: ScrollProgressConfig,
    pub parallax: ParallaxConfig,
    pub reveal: ScrollRevealConfig,
    pub stagger: StaggerRevealConfig,
    pub text_reveal: TextRevealConfig,
    pub typewriter: TypewriterConfig,
    pub counter: CounterConfig,
    pub ripple: RippleConfig,
    pub orbit: OrbitConfig,
    pub pulse_ring: PulseRingConfig,
    pub floating: FloatingConfig,
}

impl EffectsConfig {
    /// Parse a TOML document; out-of-range values are clamped
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EffectsConfig = toml::from_str(content)?;
        Ok(config.sanitized())
    }

    /// Load from a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| EffectsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded effects config");
        Self::from_toml_str(&content)
    }

    /// Load `flair.toml` from a directory, falling back to defaults when absent
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            tracing::debug!(dir = %dir.display(), "no effects config, using defaults");
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    /// Serialize to a TOML string
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Clamp every section into its valid range
    pub fn sanitized(self) -> Self {
        Self {
            tilt: self.tilt.sanitized(),
            magnetic: self.magnetic.sanitized(),
            spotlight: self.spotlight.sanitized(),
            scroll_progress: self.scroll_progress.sanitized(),
            parallax: self.parallax.sanitized(),
            reveal: self.reveal.sanitized(),
            stagger: self.stagger.sanitized(),
            text_reveal: self.text_reveal.sanitized(),
            typewriter: self.typewriter.sanitized(),
            counter: self.counter.sanitized(),
            ripple: self.ripple.sanitized(),
            orbit: self.orbit.sanitized(),
            pulse_ring: self.pulse_ring.sanitized(),
            floating: self.floating.sanitized(),
        }
    }
}

/// Clamp a numeric option into `[min, max]`, warning when it had to move
pub(crate) fn clamp_field(name: &'static str, value: f32, min: f32, max: f32) -> f32 {
    if value.is_nan() {
        tracing::warn!(field = name, fallback = min, "config value is NaN");
        return min;
    }
    let clamped = value.clamp(min, max);
    if clamped != value {
        tracing::warn!(field = name, value, clamped, "config value out of range");
    }
    clamped
}

/// Durations that drive a looping track must be at least 1 ms
pub(crate) fn clamp_ms(name: &'static str, value: u32) -> u32 {
    if value == 0 {
        tracing::warn!(field = name, "zero duration, using 1 ms");
        return 1;
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reveal::RevealTrigger;
    use flair_animation::{RevealVariant, SlideDirection};

    #[test]
    fn test_empty_file_is_default() {
        let config = EffectsConfig::from_toml_str("").unwrap();
        assert_eq!(config, EffectsConfig::default());
    }

    #[test]
    fn test_partial_sections() {
        let config = EffectsConfig::from_toml_str(
            r#"
            [tilt]
            max_tilt_deg = 15.0

            [reveal]
            trigger = "repeat"
            variant = { slide = "left" }

            [typewriter]
            cursor = false
            "#,
        )
        .unwrap();

        assert_eq!(config.tilt.max_tilt_deg, 15.0);
        assert!(config.tilt.glare);
        assert_eq!(config.reveal.trigger, RevealTrigger::Repeat);
        assert_eq!(config.reveal.variant, RevealVariant::Slide(SlideDirection::Left));
        assert_eq!(config.reveal.threshold, 0.1);
        assert!(!config.typewriter.cursor);
        assert_eq!(config.typewriter.char_interval_ms, 50.0);
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let config = EffectsConfig::from_toml_str(
            r#"
            [reveal]
            threshold = 4.0
            duration_ms = -100.0

            [typewriter]
            char_interval_ms = 0.0
            "#,
        )
        .unwrap();
        assert_eq!(config.reveal.threshold, 1.0);
        assert_eq!(config.reveal.duration_ms, 0.0);
        assert_eq!(config.typewriter.char_interval_ms, 1.0);
    }

    #[test]
    fn test_type_errors_are_reported() {
        let err = EffectsConfig::from_toml_str("[tilt]\nglare = \"yes\"").unwrap_err();
        assert!(matches!(err, EffectsError::Parse(_)));
    }

    #[test]
    fn test_clamp_field() {
        assert_eq!(clamp_field("x", 0.5, 0.0, 1.0), 0.5);
        assert_eq!(clamp_field("x", -1.0, 0.0, 1.0), 0.0);
        assert_eq!(clamp_field("x", f32::NAN, 0.0, 1.0), 0.0);
        assert_eq!(clamp_ms("y", 0), 1);
    }
}
