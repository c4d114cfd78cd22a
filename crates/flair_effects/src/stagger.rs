//! Staggered group entrances
//!
//! [`StaggerReveal`] reveals a container's children one after another once
//! the container scrolls into view. [`TextReveal`] plays a per-character
//! entrance for a line of text as soon as it mounts.

use flair_animation::{
    Easing, KeyframeProperties, PropertyTween, RevealVariant, StaggerConfig, Timeline,
    TimelineEntryId,
};
use flair_core::{event_types, Event, EventData, EventHandler, Rect};
use serde::{Deserialize, Serialize};

use crate::config::clamp_field;
use crate::reveal::{RevealState, RevealTrigger, ScrollReveal, ScrollRevealConfig};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaggerRevealConfig {
    /// Delay schedule between children
    pub stagger: StaggerConfig,
    pub variant: RevealVariant,
    pub distance: f32,
    pub child_duration_ms: f32,
    pub trigger: RevealTrigger,
    pub threshold: f32,
    pub easing: Easing,
}

impl Default for StaggerRevealConfig {
    fn default() -> Self {
        Self {
            stagger: StaggerConfig::new(100),
            variant: RevealVariant::default(),
            distance: 50.0,
            child_duration_ms: 500.0,
            trigger: RevealTrigger::Once,
            threshold: 0.1,
            easing: Easing::ENTRANCE,
        }
    }
}

impl StaggerRevealConfig {
    pub fn sanitized(self) -> Self {
        Self {
            distance: clamp_field("stagger.distance", self.distance, 0.0, f32::MAX),
            child_duration_ms: clamp_field(
                "stagger.child_duration_ms",
                self.child_duration_ms,
                0.0,
                f32::MAX,
            ),
            threshold: clamp_field("stagger.threshold", self.threshold, 0.0, 1.0),
            ..self
        }
    }
}

/// Container reveal whose children follow with staggered delays
pub struct StaggerReveal {
    config: StaggerRevealConfig,
    container: ScrollReveal,
    children: Vec<PropertyTween>,
}

impl StaggerReveal {
    pub fn new(config: StaggerRevealConfig, child_count: usize) -> Self {
        let config = config.sanitized();
        let container = ScrollReveal::new(ScrollRevealConfig {
            variant: RevealVariant::Slide(flair_animation::SlideDirection::None),
            distance: 0.0,
            duration_ms: config.child_duration_ms,
            trigger: config.trigger,
            threshold: config.threshold,
            easing: config.easing,
            delay_ms: 0.0,
        });
        let mut reveal = Self {
            config,
            container,
            children: Vec::new(),
        };
        reveal.set_child_count(child_count);
        reveal
    }

    /// Rebuild the child schedule; new children start in the container's state
    pub fn set_child_count(&mut self, count: usize) {
        let resting = self.properties_for(self.container.state());
        let delays = self.config.stagger.delays(count);
        self.children = delays
            .into_iter()
            .map(|delay| {
                PropertyTween::new(resting, self.config.child_duration_ms, self.config.easing)
                    .with_delay(delay as f32)
            })
            .collect();
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn state(&self) -> RevealState {
        self.container.state()
    }

    pub fn set_visible_ratio(&mut self, ratio: f32) -> bool {
        if !self.container.set_visible_ratio(ratio) {
            return false;
        }
        let target = self.properties_for(self.container.state());
        for child in &mut self.children {
            child.retarget(target);
        }
        true
    }

    pub fn observe(&mut self, element: &Rect, viewport: &Rect) -> bool {
        self.set_visible_ratio(crate::reveal::visible_ratio(element, viewport))
    }

    pub fn tick(&mut self, dt_ms: f32) {
        self.container.tick(dt_ms);
        for child in &mut self.children {
            child.tick(dt_ms);
        }
    }

    pub fn is_animating(&self) -> bool {
        self.container.is_animating() || self.children.iter().any(|c| !c.is_finished())
    }

    pub fn container_properties(&self) -> KeyframeProperties {
        self.container.properties()
    }

    pub fn child_properties(&self, index: usize) -> Option<KeyframeProperties> {
        self.children.get(index).map(PropertyTween::current)
    }

    /// Time from trigger until the last child settles
    pub fn total_duration_ms(&self) -> f32 {
        self.children
            .iter()
            .map(|c| c.delay_ms() + c.duration_ms())
            .fold(0.0, f32::max)
    }

    fn properties_for(&self, state: RevealState) -> KeyframeProperties {
        match state {
            RevealState::Visible => self.config.variant.visible(),
            RevealState::Hidden => self.config.variant.hidden(self.config.distance),
        }
    }
}

impl EventHandler for StaggerReveal {
    fn handle_event(&mut self, event: &Event) -> bool {
        match (event.event_type, &event.data) {
            (event_types::VISIBILITY, EventData::Visibility { ratio }) => {
                self.set_visible_ratio(*ratio)
            }
            (event_types::UNMOUNT, _) => {
                self.container.reset();
                let hidden = self.properties_for(RevealState::Hidden);
                for child in &mut self.children {
                    child.snap_to(hidden);
                }
                true
            }
            _ => false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextRevealConfig {
    pub delay_ms: u32,
    /// Delay between consecutive characters
    pub stagger_ms: u32,
    pub char_duration_ms: u32,
    /// How far each character rises while fading in
    pub rise_px: f32,
    pub easing: Easing,
}

impl Default for TextRevealConfig {
    fn default() -> Self {
        Self {
            delay_ms: 0,
            stagger_ms: 30,
            char_duration_ms: 300,
            rise_px: 20.0,
            easing: Easing::ENTRANCE,
        }
    }
}

impl TextRevealConfig {
    pub fn sanitized(self) -> Self {
        Self {
            rise_px: clamp_field("text_reveal.rise_px", self.rise_px, 0.0, f32::MAX),
            ..self
        }
    }
}

/// One character's presentation this frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glyph {
    /// Index of the word the character belongs to
    pub word: usize,
    pub ch: char,
    pub opacity: f32,
    pub translate_y: f32,
}

struct GlyphEntry {
    word: usize,
    ch: char,
    entry: TimelineEntryId,
}

/// Per-character text entrance.
///
/// Words split on whitespace; each non-space character starts
/// `delay + index * stagger` after mount, `index` counting characters across
/// the whole text.
pub struct TextReveal {
    config: TextRevealConfig,
    text: String,
    glyphs: Vec<GlyphEntry>,
    timeline: Timeline,
}

impl TextReveal {
    pub fn new(text: impl Into<String>, config: TextRevealConfig) -> Self {
        let mut reveal = Self {
            config: config.sanitized(),
            text: String::new(),
            glyphs: Vec::new(),
            timeline: Timeline::new(),
        };
        reveal.set_text(text);
        reveal
    }

    /// Replace the text and restart the entrance
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.timeline = Timeline::new();
        self.glyphs.clear();

        let config = self.config;
        let mut index: u32 = 0;
        for (word, chars) in self.text.split_whitespace().enumerate() {
            for ch in chars.chars() {
                let offset = config.delay_ms.saturating_add(index.saturating_mul(config.stagger_ms));
                let entry = self
                    .timeline
                    .add(offset, config.char_duration_ms, 0.0, 1.0, config.easing);
                self.glyphs.push(GlyphEntry { word, ch, entry });
                index += 1;
            }
        }
        self.timeline.start();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn word_count(&self) -> usize {
        self.glyphs.last().map_or(0, |g| g.word + 1)
    }

    pub fn tick(&mut self, dt_ms: f32) {
        self.timeline.tick(dt_ms);
    }

    pub fn is_finished(&self) -> bool {
        !self.timeline.is_playing()
    }

    pub fn duration_ms(&self) -> u32 {
        self.timeline.duration_ms()
    }

    pub fn glyphs(&self) -> impl Iterator<Item = Glyph> + '_ {
        let rise = self.config.rise_px;
        self.glyphs.iter().map(move |g| {
            let t = self.timeline.value(g.entry).unwrap_or(1.0);
            Glyph {
                word: g.word,
                ch: g.ch,
                opacity: t,
                translate_y: rise * (1.0 - t),
            }
        })
    }

    /// Jump to the fully revealed state
    pub fn finish(&mut self) {
        self.timeline.finish();
    }
}

impl EventHandler for TextReveal {
    fn handle_event(&mut self, event: &Event) -> bool {
        match event.event_type {
            event_types::MOUNT => {
                self.timeline.start();
                true
            }
            event_types::UNMOUNT => {
                self.timeline.stop();
                true
            }
            _ => false,
        }
    }
}
