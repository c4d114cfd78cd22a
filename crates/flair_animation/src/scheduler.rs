//! Cooperative timer scheduler
//!
//! Drives every time-based effect from one clock on the UI thread. The host
//! calls [`TimerScheduler::advance`] once per frame with the elapsed time;
//! due callbacks run in registration order, never concurrently.
//!
//! Registering a timer returns a [`TimerHandle`]. The handle owns the timer:
//! cancelling it or dropping it removes the timer, so an effect that keeps
//! its handle next to its state releases the timer on every exit path
//! (completion, input change, teardown) without extra bookkeeping.
//!
//! Callbacks may cancel timers (their own included) and register new ones
//! while the scheduler is advancing. Timers registered during an advance
//! first fire on the next one.

use slotmap::{new_key_type, SlotMap};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

new_key_type! {
    pub struct TimerId;
}

/// Shortest allowed interval period; smaller periods are clamped
pub const MIN_INTERVAL_MS: f32 = 1.0;

/// Returned by timer callbacks to keep or drop their timer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerControl {
    Continue,
    Stop,
}

/// When a timer fires
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Cadence {
    /// Every `period_ms`, catching up with several firings after a long frame
    Interval { period_ms: f32 },
    /// Once, after `delay_ms`
    Timeout { delay_ms: f32 },
    /// Once per `advance`, with that frame's elapsed time
    Frame,
}

/// Callback invoked with the time (ms) the firing accounts for
pub type TimerCallback = Box<dyn FnMut(f32) -> TimerControl>;

struct Timer {
    cadence: Cadence,
    /// Time accumulated toward the next firing
    accumulated_ms: f32,
    /// Taken out while the callback runs
    callback: Option<TimerCallback>,
}

impl Timer {
    /// How many times to fire for a frame of `dt_ms`, and the time each firing covers
    fn due(&mut self, dt_ms: f32) -> (u32, f32) {
        match self.cadence {
            Cadence::Frame => (1, dt_ms),
            Cadence::Timeout { delay_ms } => {
                self.accumulated_ms += dt_ms;
                if self.accumulated_ms >= delay_ms {
                    (1, delay_ms)
                } else {
                    (0, 0.0)
                }
            }
            Cadence::Interval { period_ms } => {
                self.accumulated_ms += dt_ms;
                let count = (self.accumulated_ms / period_ms).floor();
                self.accumulated_ms -= count * period_ms;
                (count as u32, period_ms)
            }
        }
    }

    fn is_once(&self) -> bool {
        matches!(self.cadence, Cadence::Timeout { .. })
    }
}

#[derive(Default)]
struct SchedulerInner {
    timers: SlotMap<TimerId, Timer>,
    /// Total time advanced, in ms
    now_ms: f64,
}

/// Single-threaded timer scheduler.
///
/// Cheap to clone; clones share the same timers.
#[derive(Clone, Default)]
pub struct TimerScheduler {
    inner: Rc<RefCell<SchedulerInner>>,
}

impl TimerScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `callback` every `period_ms`
    pub fn set_interval<F>(&self, period_ms: f32, callback: F) -> TimerHandle
    where
        F: FnMut(f32) -> TimerControl + 'static,
    {
        let period_ms = if period_ms.is_finite() {
            period_ms.max(MIN_INTERVAL_MS)
        } else {
            MIN_INTERVAL_MS
        };
        self.register(Cadence::Interval { period_ms }, Box::new(callback))
    }

    /// Fire `callback` once after `delay_ms`
    pub fn set_timeout<F>(&self, delay_ms: f32, callback: F) -> TimerHandle
    where
        F: FnOnce() + 'static,
    {
        let mut callback = Some(callback);
        self.register(
            Cadence::Timeout {
                delay_ms: delay_ms.max(0.0),
            },
            Box::new(move |_| {
                if let Some(callback) = callback.take() {
                    callback();
                }
                TimerControl::Stop
            }),
        )
    }

    /// Fire `callback` on every frame until it returns [`TimerControl::Stop`]
    pub fn request_frames<F>(&self, callback: F) -> TimerHandle
    where
        F: FnMut(f32) -> TimerControl + 'static,
    {
        self.register(Cadence::Frame, Box::new(callback))
    }

    fn register(&self, cadence: Cadence, callback: TimerCallback) -> TimerHandle {
        let id = self.inner.borrow_mut().timers.insert(Timer {
            cadence,
            accumulated_ms: 0.0,
            callback: Some(callback),
        });
        tracing::debug!(?id, ?cadence, "timer registered");

        TimerHandle {
            id,
            scheduler: Rc::downgrade(&self.inner),
        }
    }

    /// Remove a timer; returns whether it was still active
    pub fn cancel(&self, id: TimerId) -> bool {
        cancel_in(&self.inner, id)
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.inner.borrow().timers.contains_key(id)
    }

    /// Number of registered timers
    pub fn active_count(&self) -> usize {
        self.inner.borrow().timers.len()
    }

    pub fn has_active_timers(&self) -> bool {
        !self.inner.borrow().timers.is_empty()
    }

    /// Total time advanced so far, in ms
    pub fn now_ms(&self) -> f64 {
        self.inner.borrow().now_ms
    }

    /// Advance the clock by `dt_ms` and run every due callback.
    ///
    /// Returns the number of callbacks invoked.
    pub fn advance(&self, dt_ms: f32) -> usize {
        if dt_ms.is_nan() || dt_ms < 0.0 {
            return 0;
        }

        let due: Vec<(TimerId, u32, f32)> = {
            let mut inner = self.inner.borrow_mut();
            inner.now_ms += dt_ms as f64;
            inner
                .timers
                .iter_mut()
                .filter_map(|(id, timer)| {
                    let (count, step_ms) = timer.due(dt_ms);
                    (count > 0).then_some((id, count, step_ms))
                })
                .collect()
        };

        let mut fired = 0;
        for (id, count, step_ms) in due {
            for _ in 0..count {
                // Release the borrow while user code runs
                let callback = self
                    .inner
                    .borrow_mut()
                    .timers
                    .get_mut(id)
                    .and_then(|timer| timer.callback.take());
                let Some(mut callback) = callback else {
                    break;
                };

                let control = callback(step_ms);
                fired += 1;

                let mut inner = self.inner.borrow_mut();
                let keep = match inner.timers.get_mut(id) {
                    // Cancelled from inside its own callback
                    None => break,
                    Some(timer) => control == TimerControl::Continue && !timer.is_once(),
                };
                if keep {
                    if let Some(timer) = inner.timers.get_mut(id) {
                        timer.callback = Some(callback);
                    }
                } else {
                    let finished = inner.timers.remove(id);
                    drop(inner);
                    drop(finished);
                    tracing::debug!(?id, "timer finished");
                    break;
                }
            }
        }

        tracing::trace!(dt_ms, fired, "scheduler advanced");
        fired
    }
}

fn cancel_in(inner: &RefCell<SchedulerInner>, id: TimerId) -> bool {
    let removed = match inner.try_borrow_mut() {
        Ok(mut inner) => inner.timers.remove(id),
        Err(_) => {
            tracing::warn!(?id, "scheduler busy, timer not cancelled");
            return false;
        }
    };

    // Dropped outside the borrow: the callback may own other handles
    match removed {
        Some(timer) => {
            drop(timer);
            tracing::debug!(?id, "timer cancelled");
            true
        }
        None => false,
    }
}

/// Owning handle to a registered timer. Dropping it cancels the timer.
#[must_use = "dropping a TimerHandle cancels the timer"]
pub struct TimerHandle {
    id: TimerId,
    scheduler: Weak<RefCell<SchedulerInner>>,
}

impl TimerHandle {
    pub fn id(&self) -> TimerId {
        self.id
    }

    /// Whether the timer is still registered (not finished, not cancelled)
    pub fn is_active(&self) -> bool {
        self.scheduler
            .upgrade()
            .is_some_and(|inner| inner.borrow().timers.contains_key(self.id))
    }

    /// Cancel explicitly; equivalent to dropping the handle
    pub fn cancel(self) {
        drop(self);
    }

    /// Let the timer run to completion without this handle owning it
    pub fn detach(self) -> TimerId {
        let id = self.id;
        std::mem::forget(self);
        id
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        if let Some(inner) = self.scheduler.upgrade() {
            cancel_in(&inner, self.id);
        }
    }
}

impl std::fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerHandle").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_interval_fires_on_period() {
        let scheduler = TimerScheduler::new();
        let count = Rc::new(Cell::new(0));
        let counter = count.clone();

        let _handle = scheduler.set_interval(50.0, move |_| {
            counter.set(counter.get() + 1);
            TimerControl::Continue
        });

        scheduler.advance(30.0);
        assert_eq!(count.get(), 0);
        scheduler.advance(30.0);
        assert_eq!(count.get(), 1);
        // Long frame catches up
        scheduler.advance(140.0);
        assert_eq!(count.get(), 4);
    }

    #[test]
    fn test_stop_removes_timer() {
        let scheduler = TimerScheduler::new();
        let count = Rc::new(Cell::new(0));
        let counter = count.clone();

        let handle = scheduler.set_interval(10.0, move |_| {
            counter.set(counter.get() + 1);
            if counter.get() == 3 {
                TimerControl::Stop
            } else {
                TimerControl::Continue
            }
        });

        scheduler.advance(100.0);
        assert_eq!(count.get(), 3);
        assert!(!handle.is_active());
        assert_eq!(scheduler.active_count(), 0);
    }

    #[test]
    fn test_drop_handle_cancels() {
        let scheduler = TimerScheduler::new();
        let count = Rc::new(Cell::new(0));
        let counter = count.clone();

        let handle = scheduler.set_interval(10.0, move |_| {
            counter.set(counter.get() + 1);
            TimerControl::Continue
        });
        scheduler.advance(10.0);
        drop(handle);
        scheduler.advance(100.0);

        assert_eq!(count.get(), 1);
        assert!(!scheduler.has_active_timers());
    }

    #[test]
    fn test_timeout_fires_once() {
        let scheduler = TimerScheduler::new();
        let fired = Rc::new(Cell::new(0));
        let flag = fired.clone();

        let handle = scheduler.set_timeout(600.0, move || flag.set(flag.get() + 1));
        scheduler.advance(599.0);
        assert_eq!(fired.get(), 0);
        scheduler.advance(1.0);
        scheduler.advance(1000.0);
        assert_eq!(fired.get(), 1);
        assert!(!handle.is_active());
    }

    #[test]
    fn test_frames_receive_dt() {
        let scheduler = TimerScheduler::new();
        let total = Rc::new(Cell::new(0.0f32));
        let sum = total.clone();

        let _handle = scheduler.request_frames(move |dt| {
            sum.set(sum.get() + dt);
            TimerControl::Continue
        });
        scheduler.advance(16.0);
        scheduler.advance(17.0);
        assert_eq!(total.get(), 33.0);
        assert_eq!(scheduler.now_ms(), 33.0);
    }

    #[test]
    fn test_callback_can_cancel_another_timer() {
        let scheduler = TimerScheduler::new();
        let victim_fired = Rc::new(Cell::new(0));
        let victim_slot: Rc<RefCell<Option<TimerHandle>>> = Rc::default();

        // Registered first, so it runs before the victim in the same advance
        let killer = scheduler.request_frames({
            let slot = victim_slot.clone();
            move |_| {
                slot.borrow_mut().take();
                TimerControl::Stop
            }
        });

        let flag = victim_fired.clone();
        let victim = scheduler.set_interval(20.0, move |_| {
            flag.set(flag.get() + 1);
            TimerControl::Continue
        });
        *victim_slot.borrow_mut() = Some(victim);

        scheduler.advance(20.0);
        scheduler.advance(40.0);
        assert_eq!(victim_fired.get(), 0);
        assert!(!killer.is_active());
        assert_eq!(scheduler.active_count(), 0);
    }

    #[test]
    fn test_callback_can_schedule_new_timer() {
        let scheduler = TimerScheduler::new();
        let handles: Rc<RefCell<Vec<TimerHandle>>> = Rc::default();
        let inner_fired = Rc::new(Cell::new(0));

        let _outer = scheduler.set_timeout(10.0, {
            let scheduler = scheduler.clone();
            let handles = handles.clone();
            let inner_fired = inner_fired.clone();
            move || {
                let handle = scheduler.request_frames(move |_| {
                    inner_fired.set(inner_fired.get() + 1);
                    TimerControl::Continue
                });
                handles.borrow_mut().push(handle);
            }
        });

        scheduler.advance(10.0);
        assert_eq!(inner_fired.get(), 0);
        scheduler.advance(16.0);
        assert_eq!(inner_fired.get(), 1);
    }

    #[test]
    fn test_zero_period_is_clamped() {
        let scheduler = TimerScheduler::new();
        let count = Rc::new(Cell::new(0));
        let counter = count.clone();
        let _handle = scheduler.set_interval(0.0, move |_| {
            counter.set(counter.get() + 1);
            TimerControl::Continue
        });
        scheduler.advance(5.0);
        assert_eq!(count.get(), 5);
    }

    #[test]
    fn test_handle_outlives_scheduler() {
        let handle = {
            let scheduler = TimerScheduler::new();
            scheduler.set_interval(10.0, |_| TimerControl::Continue)
        };
        assert!(!handle.is_active());
        drop(handle);
    }
}
