//=========================================================================
// Frame Scheduler
//=========================================================================
//
// Fixed-timestep pacing with bounded catch-up.
//
//   poll(now):
//     elapsed = now - gametimer
//     elapsed <  wait            → Wait(wait - elapsed)
//     elapsed >  wait * limit    → Tick, gametimer = now        (drop backlog)
//     otherwise                  → Tick, gametimer += wait      (keep average)
//
// Exactly one tick is granted per poll, so a stall never turns into a
// burst of queued ticks. `reset()` puts the timer far in the past, which
// makes the first poll after stage entry tick immediately.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

//=== FramePoll ===========================================================

/// Scheduler decision for one poll of the wall clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramePoll {
    /// Run exactly one tick now.
    Tick,

    /// Not due yet; the next tick is this far away.
    Wait(Duration),
}

//=== FrameScheduler ======================================================

/// Fixed-timestep scheduler with a catch-up/drop policy.
#[derive(Debug, Clone)]
pub struct FrameScheduler {
    wait: Duration,
    catch_up_limit: u32,
    gametimer: Option<Duration>,
}

impl FrameScheduler {
    //--- Construction -----------------------------------------------------

    /// Creates a scheduler ticking `tps` times per second.
    ///
    /// The interval is whole milliseconds (`1000 / tps`), matching the
    /// engine's integer tick timer.
    ///
    /// # Panics
    ///
    /// Panics if `tps` is zero or above 1000, or if `catch_up_limit` is zero.
    pub fn new(tps: u32, catch_up_limit: u32) -> Self {
        assert!(tps > 0 && tps <= 1000, "TPS must be in 1..=1000, got {}", tps);
        assert!(catch_up_limit > 0, "Catch-up limit must be positive");

        Self {
            wait: Duration::from_millis(u64::from(1000 / tps)),
            catch_up_limit,
            gametimer: None,
        }
    }

    //--- Accessors --------------------------------------------------------

    /// Fixed interval between ticks.
    pub fn wait(&self) -> Duration {
        self.wait
    }

    /// Reference timestamp of the last granted tick (`None` right after reset).
    pub fn gametimer(&self) -> Option<Duration> {
        self.gametimer
    }

    //--- Scheduling -------------------------------------------------------

    /// Forgets all timing history. Called on every stage entry.
    pub fn reset(&mut self) {
        self.gametimer = None;
    }

    /// Decides whether a tick is due at `now`, updating the reference
    /// timestamp when one is granted.
    pub fn poll(&mut self, now: Duration) -> FramePoll {
        let Some(gametimer) = self.gametimer else {
            // Far in the past: tick at once and start pacing from here.
            self.gametimer = Some(now);
            return FramePoll::Tick;
        };

        let elapsed = now.saturating_sub(gametimer);
        if elapsed < self.wait {
            return FramePoll::Wait(self.wait - elapsed);
        }

        if elapsed > self.wait * self.catch_up_limit {
            self.gametimer = Some(now);
        } else {
            self.gametimer = Some(gametimer + self.wait);
        }

        FramePoll::Tick
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
