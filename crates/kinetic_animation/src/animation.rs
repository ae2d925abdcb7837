//! The timing contract shared by every animation
//!
//! An animation is anchored at a start time by [`Animation::start`] and then
//! advanced by [`Animation::poll`] with whatever timestamp the driver read
//! this tick. Timestamps need not arrive at a fixed rate; a late poll simply
//! observes a later state.

use crate::error::AnimationError;
use crate::time::{Time, NOT_STARTED};

/// A node in an animation tree
///
/// The timing queries are derived from [`start_time`](Animation::start_time)
/// and [`duration`](Animation::duration). Calling any method that takes `now`
/// before [`start`](Animation::start) is a contract violation and panics.
pub trait Animation {
    /// Anchor the animation at `start_time`
    ///
    /// # Panics
    ///
    /// Panics if `start_time` is the [`NOT_STARTED`] sentinel.
    fn start(&mut self, start_time: Time);

    /// Advance to `now`, returning `true` while the animation is still active
    fn poll(&mut self, now: Time) -> bool;

    /// Force immediate completion and reset the anchor
    fn stop(&mut self);

    fn duration(&self) -> Time;

    /// The anchor, or [`NOT_STARTED`]
    fn start_time(&self) -> Time;

    /// Whether `start` has been called since construction or the last `stop`
    fn is_scheduled(&self) -> bool {
        self.start_time() != NOT_STARTED
    }

    fn started(&self, now: Time) -> bool {
        let anchor = self.start_time();
        assert_scheduled(anchor);
        now >= anchor
    }

    fn complete(&self, now: Time) -> bool {
        let anchor = self.start_time();
        assert_scheduled(anchor);
        now >= anchor.saturating_add(self.duration())
    }

    /// Time spent inside the animation's window, in `[0, duration]`
    fn elapsed(&self, now: Time) -> Time {
        if !self.started(now) {
            return 0;
        }
        if self.complete(now) {
            return self.duration();
        }
        now - self.start_time()
    }

    fn remaining(&self, now: Time) -> Time {
        self.duration() - self.elapsed(now)
    }
}

/// Owned trait object stored by groups and drivers
pub type BoxedAnimation<'a> = Box<dyn Animation + 'a>;

impl<A: Animation + ?Sized> Animation for Box<A> {
    fn start(&mut self, start_time: Time) {
        (**self).start(start_time);
    }

    fn poll(&mut self, now: Time) -> bool {
        (**self).poll(now)
    }

    fn stop(&mut self) {
        (**self).stop();
    }

    fn duration(&self) -> Time {
        (**self).duration()
    }

    fn start_time(&self) -> Time {
        (**self).start_time()
    }

    fn is_scheduled(&self) -> bool {
        (**self).is_scheduled()
    }

    fn started(&self, now: Time) -> bool {
        (**self).started(now)
    }

    fn complete(&self, now: Time) -> bool {
        (**self).complete(now)
    }

    fn elapsed(&self, now: Time) -> Time {
        (**self).elapsed(now)
    }

    fn remaining(&self, now: Time) -> Time {
        (**self).remaining(now)
    }
}

pub(crate) fn assert_scheduled(anchor: Time) {
    if anchor == NOT_STARTED {
        panic!("{}", AnimationError::NotStarted);
    }
}

pub(crate) fn check_start_time(start_time: Time) -> Time {
    if start_time == NOT_STARTED {
        panic!("{}", AnimationError::InvalidStartTime);
    }
    start_time
}
