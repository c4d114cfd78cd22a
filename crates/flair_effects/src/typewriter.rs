//! Typewriter text reveal
//!
//! One character is revealed per tick. Driven either manually through
//! [`Typewriter::step`] or by an interval registered with a
//! [`TimerScheduler`]; the interval stops itself once the full text is
//! shown, and the timer handle lives beside the state so dropping the
//! typewriter cancels it.

use std::cell::RefCell;
use std::rc::Rc;

use flair_animation::{AnimationPreset, KeyframeTrack, TimerControl, TimerHandle, TimerScheduler};
use serde::{Deserialize, Serialize};

use crate::config::clamp_field;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypewriterConfig {
    /// Time between revealed characters
    pub char_interval_ms: f32,
    pub cursor: bool,
    /// Half period of the cursor blink
    pub cursor_blink_ms: u32,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            char_interval_ms: 50.0,
            cursor: true,
            cursor_blink_ms: 500,
        }
    }
}

impl TypewriterConfig {
    pub fn sanitized(self) -> Self {
        Self {
            char_interval_ms: clamp_field(
                "typewriter.char_interval_ms",
                self.char_interval_ms,
                flair_animation::scheduler::MIN_INTERVAL_MS,
                f32::MAX,
            ),
            cursor_blink_ms: self.cursor_blink_ms.max(1),
            ..self
        }
    }
}

type CompletionCallback = Box<dyn FnMut()>;

struct RevealProgress {
    chars: Vec<char>,
    revealed: usize,
    complete: bool,
}

impl RevealProgress {
    fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            revealed: 0,
            complete: false,
        }
    }

    /// Reveal one more character; true on the step that completes the text
    fn step(&mut self) -> bool {
        if self.complete {
            return false;
        }
        if self.revealed < self.chars.len() {
            self.revealed += 1;
        }
        if self.revealed == self.chars.len() {
            self.complete = true;
            return true;
        }
        false
    }
}

/// Advance one character and notify on completion
fn advance(
    progress: &RefCell<RevealProgress>,
    on_complete: &RefCell<Option<CompletionCallback>>,
) -> TimerControl {
    let completed = progress.borrow_mut().step();
    if completed {
        tracing::debug!("typewriter complete");
        // Released before calling out so the callback may touch the typewriter
        let taken = on_complete.borrow_mut().take();
        if let Some(mut callback) = taken {
            callback();
            let mut slot = on_complete.borrow_mut();
            if slot.is_none() {
                *slot = Some(callback);
            }
        }
    }
    if progress.borrow().complete {
        TimerControl::Stop
    } else {
        TimerControl::Continue
    }
}

pub struct Typewriter {
    config: TypewriterConfig,
    progress: Rc<RefCell<RevealProgress>>,
    on_complete: Rc<RefCell<Option<CompletionCallback>>>,
    cursor: Rc<RefCell<KeyframeTrack>>,
    scheduler: Option<TimerScheduler>,
    timer: Option<TimerHandle>,
    cursor_timer: Option<TimerHandle>,
}

impl Typewriter {
    pub fn new(text: &str, config: TypewriterConfig) -> Self {
        let config = config.sanitized();
        Self {
            progress: Rc::new(RefCell::new(RevealProgress::new(text))),
            on_complete: Rc::new(RefCell::new(None)),
            cursor: Rc::new(RefCell::new(AnimationPreset::cursor_blink(config.cursor_blink_ms))),
            scheduler: None,
            timer: None,
            cursor_timer: None,
            config,
        }
    }

    /// Called once each time the full text has been revealed
    pub fn on_complete<F: FnMut() + 'static>(&mut self, callback: F) {
        *self.on_complete.borrow_mut() = Some(Box::new(callback));
    }

    pub fn with_on_complete<F: FnMut() + 'static>(mut self, callback: F) -> Self {
        self.on_complete(callback);
        self
    }

    /// Reveal the next character by hand
    pub fn step(&mut self) {
        advance(&self.progress, &self.on_complete);
    }

    /// Start revealing on `scheduler`, one character per interval.
    ///
    /// Restarting replaces the previous timers.
    pub fn start(&mut self, scheduler: &TimerScheduler) {
        self.stop();
        self.scheduler = Some(scheduler.clone());

        let progress = Rc::clone(&self.progress);
        let on_complete = Rc::clone(&self.on_complete);
        self.timer = Some(scheduler.set_interval(self.config.char_interval_ms, move |_| {
            advance(&progress, &on_complete)
        }));

        if self.config.cursor {
            let cursor = Rc::clone(&self.cursor);
            self.cursor_timer = Some(scheduler.request_frames(move |dt_ms| {
                cursor.borrow_mut().tick(dt_ms);
                TimerControl::Continue
            }));
        }
    }

    /// Cancel all timers; the revealed text stays as it is and later
    /// [`Typewriter::set_text`] calls no longer start them again
    pub fn stop(&mut self) {
        self.timer = None;
        self.cursor_timer = None;
        self.scheduler = None;
    }

    pub fn is_running(&self) -> bool {
        self.timer.as_ref().is_some_and(TimerHandle::is_active)
    }

    /// Replace the text and start over from the first character.
    ///
    /// If the typewriter was started, it restarts on the same scheduler.
    pub fn set_text(&mut self, text: &str) {
        *self.progress.borrow_mut() = RevealProgress::new(text);
        self.cursor.borrow_mut().restart();
        if let Some(scheduler) = self.scheduler.take() {
            self.start(&scheduler);
        }
    }

    pub fn visible_text(&self) -> String {
        let progress = self.progress.borrow();
        progress.chars[..progress.revealed].iter().collect()
    }

    pub fn revealed_chars(&self) -> usize {
        self.progress.borrow().revealed
    }

    pub fn is_complete(&self) -> bool {
        self.progress.borrow().complete
    }

    /// Cursor opacity, or `None` when the cursor is disabled
    pub fn cursor_opacity(&self) -> Option<f32> {
        self.config
            .cursor
            .then(|| self.cursor.borrow().value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counter() -> (Rc<Cell<u32>>, impl FnMut() + 'static) {
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        (count, move || c.set(c.get() + 1))
    }

    #[test]
    fn test_manual_steps() {
        let (fired, callback) = counter();
        let mut typewriter =
            Typewriter::new("Hello", TypewriterConfig::default()).with_on_complete(callback);

        for n in 1..=7 {
            typewriter.step();
            let expected: String = "Hello".chars().take(n.min(5)).collect();
            assert_eq!(typewriter.visible_text(), expected);
        }
        assert!(typewriter.is_complete());
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_scheduler_drives_reveal() {
        let scheduler = TimerScheduler::new();
        let (fired, callback) = counter();
        let mut typewriter = Typewriter::new("Hi!", TypewriterConfig::default());
        typewriter.on_complete(callback);
        typewriter.start(&scheduler);

        scheduler.advance(50.0);
        assert_eq!(typewriter.visible_text(), "H");
        scheduler.advance(100.0);
        assert_eq!(typewriter.visible_text(), "Hi!");
        assert!(!typewriter.is_running());
        assert_eq!(fired.get(), 1);

        scheduler.advance(500.0);
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_set_text_restarts() {
        let scheduler = TimerScheduler::new();
        let (fired, callback) = counter();
        let mut typewriter =
            Typewriter::new("abc", TypewriterConfig::default()).with_on_complete(callback);
        typewriter.start(&scheduler);
        scheduler.advance(100.0);
        assert_eq!(typewriter.visible_text(), "ab");

        typewriter.set_text("xy");
        assert_eq!(typewriter.visible_text(), "");
        assert!(typewriter.is_running());
        scheduler.advance(100.0);
        assert_eq!(typewriter.visible_text(), "xy");
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_set_text_after_stop_stays_stopped() {
        let scheduler = TimerScheduler::new();
        let mut typewriter = Typewriter::new("abc", TypewriterConfig::default());
        typewriter.start(&scheduler);
        scheduler.advance(50.0);
        typewriter.stop();

        typewriter.set_text("xyz");
        assert!(!typewriter.is_running());
        assert_eq!(scheduler.active_count(), 0);
        scheduler.advance(200.0);
        assert_eq!(typewriter.visible_text(), "");
    }

    #[test]
    fn test_drop_cancels_timers() {
        let scheduler = TimerScheduler::new();
        let mut typewriter = Typewriter::new("long text", TypewriterConfig::default());
        typewriter.start(&scheduler);
        assert_eq!(scheduler.active_count(), 2);
        drop(typewriter);
        assert_eq!(scheduler.active_count(), 0);
    }

    #[test]
    fn test_empty_text_completes_on_first_tick() {
        let (fired, callback) = counter();
        let mut typewriter = Typewriter::new("", TypewriterConfig::default()).with_on_complete(callback);
        assert!(!typewriter.is_complete());
        typewriter.step();
        assert!(typewriter.is_complete());
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_cursor_blinks() {
        let scheduler = TimerScheduler::new();
        let mut typewriter = Typewriter::new("a", TypewriterConfig::default());
        assert_eq!(typewriter.cursor_opacity(), Some(1.0));
        typewriter.start(&scheduler);
        scheduler.advance(500.0);
        assert!(typewriter.cursor_opacity().unwrap() < 0.01);

        let plain = Typewriter::new(
            "a",
            TypewriterConfig {
                cursor: false,
                ..TypewriterConfig::default()
            },
        );
        assert_eq!(plain.cursor_opacity(), None);
    }

    #[test]
    fn test_callback_can_read_typewriter_state() {
        let mut typewriter = Typewriter::new("ok", TypewriterConfig::default());
        let progress = Rc::clone(&typewriter.progress);
        let seen = Rc::new(Cell::new(0));
        let s = Rc::clone(&seen);
        typewriter.on_complete(move || s.set(progress.borrow().revealed));
        typewriter.step();
        typewriter.step();
        assert_eq!(seen.get(), 2);
    }
}
