//=========================================================================
// Clock
//=========================================================================
//
// Wall-clock source for the frame scheduler.
//
// The scheduler only ever asks "what time is it" and "let me idle for a
// bit", so the platform timer can be swapped for a manual clock in tests.
//
//=========================================================================

//=== External Dependencies ===============================================

#[cfg(test)]
use std::cell::Cell;
#[cfg(test)]
use std::rc::Rc;
use std::thread;
use std::time::{Duration, Instant};

//=== Clock Trait =========================================================

/// Monotonic time source polled by the frame scheduler.
pub trait Clock {
    /// Time elapsed since the clock's epoch. Never decreases.
    fn now(&self) -> Duration;

    /// Yields for roughly `duration` while the scheduler has nothing to do.
    fn idle(&self, duration: Duration);
}

//=== SystemClock =========================================================

/// Clock backed by [`Instant`], idling via `thread::sleep`.
pub struct SystemClock {
    epoch: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { epoch: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.epoch.elapsed()
    }

    fn idle(&self, duration: Duration) {
        if !duration.is_zero() {
            thread::sleep(duration);
        }
    }
}

//=== ManualClock =========================================================

/// Deterministic clock that only moves when told to.
///
/// Clones share the same time, so a test can keep a handle while the
/// session owns another. Idling advances time by the requested amount.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

#[cfg(test)]
impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves time forward by `delta`.
    pub fn advance(&self, delta: Duration) {
        self.now.set(self.now.get() + delta);
    }

    /// Jumps to an absolute time. Earlier values are ignored.
    pub fn set(&self, now: Duration) {
        if now > self.now.get() {
            self.now.set(now);
        }
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }

    fn idle(&self, duration: Duration) {
        // A zero idle would spin forever under a manual clock.
        self.advance(duration.max(Duration::from_millis(1)));
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
