//! Timeline orchestration for multiple animations
//!
//! Entries start at an offset from the timeline start and run for their own
//! duration. Staggered groups (per-character text entrances, list children)
//! are a timeline with one entry per child.

use crate::easing::Easing;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    pub struct TimelineEntryId;
}

struct TimelineEntry {
    offset_ms: u32,
    duration_ms: u32,
    start_value: f32,
    end_value: f32,
    easing: Easing,
}

impl TimelineEntry {
    fn progress_at(&self, time_ms: f32) -> f32 {
        let local = time_ms - self.offset_ms as f32;
        if local <= 0.0 {
            return if self.duration_ms == 0 && local == 0.0 {
                1.0
            } else {
                0.0
            };
        }
        if self.duration_ms == 0 {
            return 1.0;
        }
        (local / self.duration_ms as f32).min(1.0)
    }
}

/// A set of offset animations sharing one clock
pub struct Timeline {
    entries: SlotMap<TimelineEntryId, TimelineEntry>,
    current_time: f32,
    duration_ms: u32,
    playing: bool,
    /// `None` loops forever
    loop_count: Option<u32>,
    current_loop: u32,
}

impl Timeline {
    pub fn new() -> Self {
        Self {
            entries: SlotMap::with_key(),
            current_time: 0.0,
            duration_ms: 0,
            playing: false,
            loop_count: Some(1),
            current_loop: 0,
        }
    }

    /// Add an entry running `start_value -> end_value` from `offset_ms`
    pub fn add(
        &mut self,
        offset_ms: u32,
        duration_ms: u32,
        start_value: f32,
        end_value: f32,
        easing: Easing,
    ) -> TimelineEntryId {
        let id = self.entries.insert(TimelineEntry {
            offset_ms,
            duration_ms,
            start_value,
            end_value,
            easing,
        });

        self.duration_ms = self.duration_ms.max(offset_ms + duration_ms);
        id
    }

    pub fn start(&mut self) {
        self.current_time = 0.0;
        self.current_loop = 0;
        self.playing = true;
    }

    pub fn stop(&mut self) {
        self.playing = false;
    }

    /// Jump to the end state of every entry
    pub fn finish(&mut self) {
        self.current_time = self.duration_ms as f32;
        self.playing = false;
    }

    pub fn set_loop(&mut self, count: Option<u32>) {
        self.loop_count = count.map(|c| c.max(1));
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Advance the clock by `dt_ms`
    pub fn tick(&mut self, dt_ms: f32) {
        if !self.playing || dt_ms <= 0.0 {
            return;
        }

        self.current_time += dt_ms;

        if self.current_time >= self.duration_ms as f32 {
            let more_loops = match self.loop_count {
                None => true,
                Some(count) => self.current_loop + 1 < count,
            };
            if more_loops && self.duration_ms > 0 {
                self.current_time %= self.duration_ms as f32;
                self.current_loop += 1;
            } else {
                self.current_time = self.duration_ms as f32;
                self.playing = false;
            }
        }
    }

    /// Linear progress of an entry (0.0 to 1.0)
    pub fn progress(&self, id: TimelineEntryId) -> Option<f32> {
        self.entries
            .get(id)
            .map(|entry| entry.progress_at(self.current_time))
    }

    /// Eased value of an entry
    pub fn value(&self, id: TimelineEntryId) -> Option<f32> {
        let entry = self.entries.get(id)?;
        let eased = entry.easing.apply(entry.progress_at(self.current_time));
        Some(entry.start_value + (entry.end_value - entry.start_value) * eased)
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}
