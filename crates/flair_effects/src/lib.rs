//! flair_effects
//!
//! Interactive and decorative UI effects computed as plain values: the host
//! feeds pointer, scroll, visibility and time events in, and reads back
//! transforms, opacities, offsets and text to paint.
//!
//! Effects never touch a renderer. Each one is a small state machine with a
//! configuration record (all fields defaulted, out-of-range values clamped)
//! and, where it reacts to input, a [`flair_core::EventHandler`] impl.
//!
//! ```rust
//! use flair_core::{Point, Rect};
//! use flair_effects::prelude::*;
//!
//! let mut card = TiltCard::default();
//! card.set_bounds(Some(Rect::new(0.0, 0.0, 200.0, 100.0)));
//! card.pointer_enter(Point::new(200.0, 50.0));
//! assert_eq!(card.target_transform().rotate_y, 10.0);
//! ```

pub mod config;
pub mod counter;
pub mod entrance;
pub mod error;
pub mod hover;
pub mod looping;
pub mod magnetic;
pub mod orbit;
pub mod pointer;
pub mod reveal;
pub mod ripple;
pub mod scroll;
pub mod spotlight;
pub mod stagger;
pub mod tilt;
pub mod typewriter;

pub use config::EffectsConfig;
pub use error::{EffectsError, Result};
pub use pointer::{center_offset, map_range, normalized_offset, PointerTracker};
pub use reveal::visible_ratio;
pub use scroll::scroll_progress;

/// Common imports for effect users.
pub mod prelude {
    pub use crate::config::EffectsConfig;
    pub use crate::counter::{AnimatedCounter, CounterConfig};
    pub use crate::entrance::{EntranceConfig, EntranceKind, MountEntrance};
    pub use crate::error::EffectsError;
    pub use crate::hover::{
        ButtonSize, GlowIntensity, HoverKind, HoverTransition, IconRotate, PressScale, ShineSweep,
    };
    pub use crate::looping::{
        ContinuousLoop, FloatingConfig, FloatingElement, LoopKind, PulseRing, PulseRingConfig,
    };
    pub use crate::magnetic::{Magnetic, MagneticConfig};
    pub use crate::orbit::{OrbitConfig, OrbitItem, OrbitingCircles};
    pub use crate::pointer::{center_offset, map_range, normalized_offset};
    pub use crate::reveal::{
        visible_ratio, RevealState, RevealTrigger, ScrollReveal, ScrollRevealConfig,
    };
    pub use crate::ripple::{RippleButton, RippleConfig, RippleFrame};
    pub use crate::scroll::{
        scroll_progress, BarPosition, Parallax, ParallaxConfig, ScrollProgress,
        ScrollProgressConfig,
    };
    pub use crate::spotlight::{Spotlight, SpotlightConfig};
    pub use crate::stagger::{StaggerReveal, StaggerRevealConfig, TextReveal, TextRevealConfig};
    pub use crate::tilt::{TiltCard, TiltConfig, TiltTransform};
    pub use crate::typewriter::{Typewriter, TypewriterConfig};

    pub use flair_animation::{Easing, RevealVariant, SlideDirection, SpringConfig, TimerScheduler};
    pub use flair_core::{Event, EventHandler, Point, Rect, ScrollMetrics};
}
