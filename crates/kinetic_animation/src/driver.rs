//! Driver-side helpers
//!
//! The engine takes `now` explicitly everywhere. These wrappers live at the
//! outermost boundary, where a render loop owns a clock and wants to write
//! `player.poll()` once per frame.

use crate::animation::{Animation, BoxedAnimation};
use crate::time::{Time, TimeSource};

/// Clock-reading overloads for any animation
pub trait Clocked: Animation {
    fn start_with(&mut self, clock: &impl TimeSource) {
        self.start(clock.now());
    }

    fn poll_with(&mut self, clock: &impl TimeSource) -> bool {
        self.poll(clock.now())
    }

    fn started_with(&self, clock: &impl TimeSource) -> bool {
        self.started(clock.now())
    }

    fn complete_with(&self, clock: &impl TimeSource) -> bool {
        self.complete(clock.now())
    }

    fn elapsed_with(&self, clock: &impl TimeSource) -> Time {
        self.elapsed(clock.now())
    }

    fn remaining_with(&self, clock: &impl TimeSource) -> Time {
        self.remaining(clock.now())
    }
}

impl<A: Animation + ?Sized> Clocked for A {}

/// Owns a root animation and the clock that drives it
///
/// Each call reads the clock once, so a whole tree is evaluated against a
/// single instant per frame.
pub struct Player<'a, C: TimeSource> {
    root: BoxedAnimation<'a>,
    clock: C,
    active: bool,
    frames: u64,
}

impl<'a, C: TimeSource> Player<'a, C> {
    pub fn new(root: impl Animation + 'a, clock: C) -> Self {
        Self {
            root: Box::new(root),
            clock,
            active: false,
            frames: 0,
        }
    }

    /// Anchor the root at the clock's current reading
    pub fn start(&mut self) {
        let now = self.clock.now();
        tracing::debug!(now, duration = self.root.duration(), "player started");
        self.root.start(now);
        self.active = true;
        self.frames = 0;
    }

    /// Advance one frame, returning whether the root is still active
    ///
    /// Once the root has reported finished this is a no-op returning `false`.
    pub fn poll(&mut self) -> bool {
        if !self.active {
            return false;
        }
        let now = self.clock.now();
        self.frames += 1;
        self.active = self.root.poll(now);
        if !self.active {
            tracing::debug!(now, frames = self.frames, "player finished");
        }
        self.active
    }

    pub fn stop(&mut self) {
        if self.root.is_scheduled() {
            self.root.stop();
        }
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Number of polls since the last `start`
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn root(&self) -> &dyn Animation {
        &*self.root
    }

    pub fn duration(&self) -> Time {
        self.root.duration()
    }

    pub fn started(&self) -> bool {
        self.root.started_with(&self.clock)
    }

    pub fn complete(&self) -> bool {
        self.root.complete_with(&self.clock)
    }

    pub fn elapsed(&self) -> Time {
        self.root.elapsed_with(&self.clock)
    }

    pub fn remaining(&self) -> Time {
        self.root.remaining_with(&self.clock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::SequentialAnimationGroup;
    use crate::property::PropertyAnimation;
    use crate::time::ManualClock;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_clocked_overloads() {
        let clock = ManualClock::new(100);
        let mut value = 0.0_f64;
        let mut anim = PropertyAnimation::from_to(&mut value, 0.0, 10.0, 100);
        anim.start_with(&clock);
        assert_eq!(anim.start_time(), 100);

        clock.advance(25);
        assert!(anim.started_with(&clock));
        assert_eq!(anim.elapsed_with(&clock), 25);
        assert_eq!(anim.remaining_with(&clock), 75);
        assert!(anim.poll_with(&clock));
        assert!(!anim.complete_with(&clock));
    }

    #[test]
    fn test_player_runs_to_completion() {
        let clock = ManualClock::new(0);
        let value = Rc::new(Cell::new(0.0_f64));
        let tree = SequentialAnimationGroup::new()
            .with(PropertyAnimation::from_to(Rc::clone(&value), 0.0, 1.0, 32))
            .with(PropertyAnimation::from_to(Rc::clone(&value), 1.0, 0.0, 32));
        let mut player = Player::new(tree, &clock);
        assert_eq!(player.duration(), 64);

        player.start();
        while player.poll() {
            clock.advance(16);
        }
        assert_eq!(player.frames(), 5);
        assert_eq!(value.get(), 0.0);
        assert!(player.complete());
        assert!(!player.poll());
        assert_eq!(player.frames(), 5);
    }

    #[test]
    fn test_player_stop() {
        let clock = ManualClock::new(0);
        let value = Rc::new(Cell::new(0.0_f64));
        let mut player = Player::new(
            PropertyAnimation::from_to(Rc::clone(&value), 0.0, 4.0, 1000),
            &clock,
        );
        player.start();
        clock.advance(10);
        assert!(player.poll());
        player.stop();
        assert!(!player.is_active());
        assert_eq!(value.get(), 4.0);
        assert!(!player.root().is_scheduled());
    }
}
