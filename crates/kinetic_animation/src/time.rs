//! Time model
//!
//! Timestamps are signed milliseconds since an arbitrary epoch. The engine
//! itself never reads a clock: every control-flow entry point receives `now`
//! from the driver, which owns a [`TimeSource`].

use std::cell::Cell;
use std::time::Instant;

/// Milliseconds since an arbitrary epoch
pub type Time = i64;

/// Anchor value of an animation that has not been started
pub const NOT_STARTED: Time = Time::MAX;

/// A monotonically non-decreasing clock
///
/// The unit must match the durations handed to the engine (milliseconds for
/// the clocks in this module).
pub trait TimeSource {
    fn now(&self) -> Time;
}

impl<S: TimeSource + ?Sized> TimeSource for &S {
    fn now(&self) -> Time {
        (**self).now()
    }
}

/// Wall clock backed by [`Instant`]
///
/// Reads milliseconds elapsed since the clock was created.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for SystemClock {
    fn now(&self) -> Time {
        Time::try_from(self.origin.elapsed().as_millis()).unwrap_or(NOT_STARTED - 1)
    }
}

/// Simulated clock advanced explicitly by the driver
///
/// Uses interior mutability so a shared reference can be handed to a
/// [`Player`](crate::driver::Player) while the render loop keeps advancing it.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Cell<Time>,
}

impl ManualClock {
    pub fn new(start: Time) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    /// Jump to an absolute timestamp
    ///
    /// # Panics
    ///
    /// Panics if `time` is earlier than the current reading.
    pub fn set(&self, time: Time) {
        assert!(
            time >= self.now.get(),
            "ManualClock cannot move backwards ({} -> {})",
            self.now.get(),
            time
        );
        self.now.set(time);
    }

    /// Move the clock forward by `dt` milliseconds and return the new reading
    pub fn advance(&self, dt: Time) -> Time {
        assert!(dt >= 0, "ManualClock cannot advance by a negative step");
        let next = self.now.get().saturating_add(dt);
        self.now.set(next);
        next
    }
}

impl TimeSource for ManualClock {
    fn now(&self) -> Time {
        self.now.get()
    }
}
