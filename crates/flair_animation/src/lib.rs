//! Flair Animation System
//!
//! The time-based building blocks shared by every Flair effect.
//!
//! # Features
//!
//! - **Easing**: CSS-compatible curves including `cubic-bezier`
//! - **Spring Physics**: RK4-integrated springs for pointer-following motion
//! - **Keyframe Tracks**: looping, ping-pong and delayed single-value tracks
//! - **Property Tweens**: retargetable transitions between property bundles
//! - **Stagger & Timelines**: per-child delays for grouped entrances
//! - **Timer Scheduler**: cooperative intervals/timeouts/frames with owning handles

pub mod easing;
pub mod keyframe;
pub mod presets;
pub mod scheduler;
pub mod spring;
pub mod stagger;
pub mod timeline;
pub mod tween;

pub use easing::{ease_out_cubic, ease_out_cubic_f64, Easing};
pub use keyframe::{Keyframe, KeyframeProperties, KeyframeTrack, KeyframeTrackBuilder, PlayDirection};
pub use presets::{AnimationPreset, RevealVariant, SlideDirection};
pub use scheduler::{Cadence, TimerControl, TimerHandle, TimerId, TimerScheduler};
pub use spring::{Spring, SpringConfig, SpringPoint};
pub use stagger::{StaggerConfig, StaggerDirection};
pub use timeline::{Timeline, TimelineEntryId};
pub use tween::PropertyTween;
