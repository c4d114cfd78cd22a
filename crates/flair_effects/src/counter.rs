//! Animated number counter
//!
//! Counts from the displayed value to a target over a fixed duration with
//! ease-out-cubic, landing exactly on the target.

use std::cell::RefCell;
use std::rc::Rc;

use flair_animation::{ease_out_cubic_f64, TimerControl, TimerHandle, TimerScheduler};
use serde::{Deserialize, Serialize};

use crate::config::clamp_field;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    pub duration_ms: f32,
    /// Digits after the decimal point in [`AnimatedCounter::formatted`]
    pub decimals: usize,
    pub prefix: String,
    pub suffix: String,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            duration_ms: 1000.0,
            decimals: 0,
            prefix: String::new(),
            suffix: String::new(),
        }
    }
}

impl CounterConfig {
    pub fn sanitized(self) -> Self {
        Self {
            duration_ms: clamp_field("counter.duration_ms", self.duration_ms, 0.0, f32::MAX),
            decimals: self.decimals.min(12),
            ..self
        }
    }
}

type CompletionCallback = Box<dyn FnMut(f64)>;

struct CountState {
    duration_ms: f64,
    start: f64,
    target: f64,
    elapsed_ms: f64,
    value: f64,
    finished: bool,
}

impl CountState {
    /// Advance by `dt_ms`; true on the tick that reaches the target
    fn tick(&mut self, dt_ms: f32) -> bool {
        if self.finished {
            return false;
        }
        if dt_ms > 0.0 {
            self.elapsed_ms += dt_ms as f64;
        }
        let progress = if self.duration_ms <= 0.0 {
            1.0
        } else {
            (self.elapsed_ms / self.duration_ms).min(1.0)
        };

        if progress >= 1.0 {
            self.value = self.target;
            self.finished = true;
            return true;
        }
        self.value = self.start + (self.target - self.start) * ease_out_cubic_f64(progress);
        false
    }
}

fn advance(
    state: &RefCell<CountState>,
    on_complete: &RefCell<Option<CompletionCallback>>,
    dt_ms: f32,
) -> TimerControl {
    let (completed, value) = {
        let mut state = state.borrow_mut();
        (state.tick(dt_ms), state.value)
    };
    if completed {
        tracing::debug!(value, "counter reached target");
        let taken = on_complete.borrow_mut().take();
        if let Some(mut callback) = taken {
            callback(value);
            let mut slot = on_complete.borrow_mut();
            if slot.is_none() {
                *slot = Some(callback);
            }
        }
        TimerControl::Stop
    } else {
        TimerControl::Continue
    }
}

pub struct AnimatedCounter {
    config: CounterConfig,
    state: Rc<RefCell<CountState>>,
    on_complete: Rc<RefCell<Option<CompletionCallback>>>,
    scheduler: Option<TimerScheduler>,
    timer: Option<TimerHandle>,
}

impl AnimatedCounter {
    /// A counter resting at 0
    pub fn new(config: CounterConfig) -> Self {
        let config = config.sanitized();
        let state = CountState {
            duration_ms: config.duration_ms as f64,
            start: 0.0,
            target: 0.0,
            elapsed_ms: 0.0,
            value: 0.0,
            finished: true,
        };
        Self {
            config,
            state: Rc::new(RefCell::new(state)),
            on_complete: Rc::new(RefCell::new(None)),
            scheduler: None,
            timer: None,
        }
    }

    /// Called with the final value each time a count finishes
    pub fn on_complete<F: FnMut(f64) + 'static>(&mut self, callback: F) {
        *self.on_complete.borrow_mut() = Some(Box::new(callback));
    }

    /// Count toward `target`, starting from the value currently displayed
    pub fn set_target(&mut self, target: f64) {
        if !target.is_finite() {
            tracing::warn!(target, "ignoring non-finite counter target");
            return;
        }
        {
            let mut state = self.state.borrow_mut();
            state.start = state.value;
            state.target = target;
            state.elapsed_ms = 0.0;
            state.finished = false;
        }
        if let Some(scheduler) = self.scheduler.take() {
            self.start(&scheduler);
        }
    }

    /// Advance by hand
    pub fn tick(&mut self, dt_ms: f32) {
        advance(&self.state, &self.on_complete, dt_ms);
    }

    /// Drive the counter from `scheduler`'s frames until it reaches the target
    pub fn start(&mut self, scheduler: &TimerScheduler) {
        self.stop();
        self.scheduler = Some(scheduler.clone());
        if self.is_finished() {
            return;
        }

        let state = Rc::clone(&self.state);
        let on_complete = Rc::clone(&self.on_complete);
        self.timer = Some(scheduler.request_frames(move |dt_ms| {
            advance(&state, &on_complete, dt_ms)
        }));
    }

    /// Cancel the frame timer. Later retargets no longer start it again.
    pub fn stop(&mut self) {
        self.timer = None;
        self.scheduler = None;
    }

    pub fn is_running(&self) -> bool {
        self.timer.as_ref().is_some_and(TimerHandle::is_active)
    }

    pub fn value(&self) -> f64 {
        self.state.borrow().value
    }

    pub fn target(&self) -> f64 {
        self.state.borrow().target
    }

    pub fn is_finished(&self) -> bool {
        self.state.borrow().finished
    }

    /// Displayed value with prefix, suffix and fixed decimals
    pub fn formatted(&self) -> String {
        format!(
            "{}{:.*}{}",
            self.config.prefix,
            self.config.decimals,
            self.value(),
            self.config.suffix
        )
    }
}

impl Default for AnimatedCounter {
    fn default() -> Self {
        Self::new(CounterConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_counts_up_strictly() {
        let mut counter = AnimatedCounter::default();
        counter.set_target(1234.0);
        assert_eq!(counter.value(), 0.0);

        let mut last = counter.value();
        for _ in 0..100 {
            counter.tick(10.0);
            let value = counter.value();
            assert!(value > last);
            assert!(value <= 1234.0);
            last = value;
        }
        assert_eq!(counter.value(), 1234.0);
        assert!(counter.is_finished());

        counter.tick(10.0);
        assert_eq!(counter.value(), 1234.0);
    }

    #[test]
    fn test_millisecond_ticks_keep_rising_until_the_end() {
        let mut counter = AnimatedCounter::default();
        counter.set_target(1234.0);

        let mut last = counter.value();
        for elapsed in 1..=1000 {
            counter.tick(1.0);
            let value = counter.value();
            assert!(value > last, "flat at {elapsed} ms: {value}");
            if elapsed < 1000 {
                assert!(value < 1234.0, "landed early at {elapsed} ms");
            }
            last = value;
        }
        assert_eq!(counter.value(), 1234.0);
        assert!(counter.is_finished());
    }

    #[test]
    fn test_retarget_starts_from_display() {
        let mut counter = AnimatedCounter::default();
        counter.set_target(100.0);
        counter.tick(500.0);
        let midway = counter.value();
        assert!(midway > 50.0 && midway < 100.0);

        counter.set_target(0.0);
        assert_eq!(counter.value(), midway);
        counter.tick(1000.0);
        assert_eq!(counter.value(), 0.0);
    }

    #[test]
    fn test_completion_fires_once() {
        let fired = Rc::new(Cell::new(0));
        let f = Rc::clone(&fired);
        let mut counter = AnimatedCounter::default();
        counter.on_complete(move |value| {
            assert_eq!(value, 42.0);
            f.set(f.get() + 1);
        });
        counter.set_target(42.0);
        counter.tick(600.0);
        counter.tick(600.0);
        counter.tick(600.0);
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_scheduler_frames() {
        let scheduler = TimerScheduler::new();
        let mut counter = AnimatedCounter::default();
        counter.set_target(10.0);
        counter.start(&scheduler);
        assert!(counter.is_running());

        for _ in 0..70 {
            scheduler.advance(16.0);
        }
        assert_eq!(counter.value(), 10.0);
        assert!(!counter.is_running());
        assert!(!scheduler.has_active_timers());

        counter.set_target(20.0);
        assert!(counter.is_running());
        drop(counter);
        assert!(!scheduler.has_active_timers());
    }

    #[test]
    fn test_retarget_after_stop_stays_stopped() {
        let scheduler = TimerScheduler::new();
        let mut counter = AnimatedCounter::default();
        counter.set_target(10.0);
        counter.start(&scheduler);
        scheduler.advance(16.0);
        counter.stop();

        counter.set_target(20.0);
        assert!(!counter.is_running());
        assert!(!scheduler.has_active_timers());
        let held = counter.value();
        scheduler.advance(16.0);
        assert_eq!(counter.value(), held);

        counter.start(&scheduler);
        assert!(counter.is_running());
    }

    #[test]
    fn test_formatting() {
        let mut counter = AnimatedCounter::new(CounterConfig {
            duration_ms: 0.0,
            decimals: 1,
            prefix: "$".to_string(),
            suffix: "k".to_string(),
        });
        counter.set_target(12.34);
        counter.tick(16.0);
        assert_eq!(counter.formatted(), "$12.3k");
    }
}
