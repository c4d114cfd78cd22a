//! Scroll-driven effects
//!
//! Both effects recompute synchronously on every scroll event; there is no
//! debouncing.

use flair_core::{event_types, Event, EventData, EventHandler, ScrollMetrics};
use serde::{Deserialize, Serialize};

use crate::config::clamp_field;

/// Fraction of the document scrolled, in `[0, 1]`.
///
/// A document that fits in the viewport has nothing to scroll and reports 0.
pub fn scroll_progress(metrics: &ScrollMetrics) -> f32 {
    let max = metrics.max_offset();
    if max.is_nan() || max <= 0.0 || !metrics.offset.is_finite() {
        return 0.0;
    }
    (metrics.offset / max).clamp(0.0, 1.0)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarPosition {
    #[default]
    Top,
    Bottom,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollProgressConfig {
    pub height_px: f32,
    pub position: BarPosition,
    pub color: String,
}

impl Default for ScrollProgressConfig {
    fn default() -> Self {
        Self {
            height_px: 4.0,
            position: BarPosition::Top,
            color: "var(--primary)".to_string(),
        }
    }
}

impl ScrollProgressConfig {
    pub fn sanitized(self) -> Self {
        Self {
            height_px: clamp_field("scroll_progress.height_px", self.height_px, 0.0, f32::MAX),
            ..self
        }
    }
}

/// Reading-progress bar pinned to the top or bottom of the viewport
#[derive(Clone, Debug, Default)]
pub struct ScrollProgress {
    config: ScrollProgressConfig,
    progress: f32,
}

impl ScrollProgress {
    pub fn new(config: ScrollProgressConfig) -> Self {
        Self {
            config: config.sanitized(),
            progress: 0.0,
        }
    }

    pub fn config(&self) -> &ScrollProgressConfig {
        &self.config
    }

    /// Recompute from new scroll metrics; returns true when the progress changed
    pub fn on_scroll(&mut self, metrics: &ScrollMetrics) -> bool {
        let progress = scroll_progress(metrics);
        let changed = progress != self.progress;
        self.progress = progress;
        changed
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn percent(&self) -> f32 {
        self.progress * 100.0
    }

    /// Filled width of a bar spanning `track_width` pixels
    pub fn bar_width(&self, track_width: f32) -> f32 {
        track_width.max(0.0) * self.progress
    }
}

impl EventHandler for ScrollProgress {
    fn handle_event(&mut self, event: &Event) -> bool {
        match (event.event_type, &event.data) {
            (event_types::SCROLL, EventData::Scroll(metrics)) => self.on_scroll(metrics),
            _ => false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    /// Translation per viewport of travel, as a fraction of 100 px
    pub speed: f32,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self { speed: 0.5 }
    }
}

impl ParallaxConfig {
    pub fn sanitized(self) -> Self {
        Self {
            speed: clamp_field("parallax.speed", self.speed, -10.0, 10.0),
        }
    }
}

/// Vertical parallax offset from an element's position in the viewport.
///
/// The host reports the element's viewport-relative bounds through layout
/// events and the viewport height through scroll or resize events.
#[derive(Clone, Debug, Default)]
pub struct Parallax {
    config: ParallaxConfig,
    element_top: Option<f32>,
    viewport_height: f32,
    offset_y: f32,
}

impl Parallax {
    pub fn new(config: ParallaxConfig) -> Self {
        Self {
            config: config.sanitized(),
            ..Self::default()
        }
    }

    /// Recompute from the element's top edge and the viewport height.
    ///
    /// Skipped when the viewport has no height; the previous offset is kept.
    pub fn update(&mut self, element_top: f32, viewport_height: f32) -> bool {
        self.element_top = Some(element_top);
        self.viewport_height = viewport_height;
        self.recompute()
    }

    /// Translate-y in pixels
    pub fn offset_y(&self) -> f32 {
        self.offset_y
    }

    fn recompute(&mut self) -> bool {
        let Some(top) = self.element_top else {
            return false;
        };
        if self.viewport_height.is_nan() || self.viewport_height <= 0.0 || !top.is_finite() {
            return false;
        }
        let offset = top / self.viewport_height * self.config.speed * 100.0;
        let changed = offset != self.offset_y;
        self.offset_y = offset;
        changed
    }
}

impl EventHandler for Parallax {
    fn handle_event(&mut self, event: &Event) -> bool {
        match (event.event_type, &event.data) {
            (event_types::LAYOUT, EventData::Layout(Some(bounds))) => {
                self.element_top = Some(bounds.top());
                self.recompute()
            }
            (event_types::LAYOUT, EventData::Layout(None)) => {
                self.element_top = None;
                false
            }
            (event_types::SCROLL, EventData::Scroll(metrics)) => {
                self.viewport_height = metrics.viewport_height;
                self.recompute()
            }
            (event_types::RESIZE, EventData::Resize { height, .. }) => {
                self.viewport_height = *height;
                self.recompute()
            }
            _ => false,
        }
    }
}
