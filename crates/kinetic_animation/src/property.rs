//! Property animations
//!
//! The leaves of an animation tree. A [`PropertyAnimation`] drives one
//! externally owned value from a start snapshot to a complete snapshot,
//! shaped by an [`Interpolator`].

use crate::animation::{assert_scheduled, check_start_time, Animation};
use crate::binding::Binding;
use crate::error::{AnimationError, Result};
use crate::interpolator::Interpolator;
use crate::time::{Time, NOT_STARTED};
use crate::values::Blend;

/// Animates a bound value between two states over a fixed duration
#[derive(Debug)]
pub struct PropertyAnimation<T, B> {
    binding: B,
    start_state: T,
    complete_state: T,
    duration: Time,
    interpolator: Interpolator,
    start_time: Time,
}

impl<T: Blend, B: Binding<T>> PropertyAnimation<T, B> {
    /// Create a property animation
    ///
    /// # Panics
    ///
    /// Panics if `duration` is not positive. See [`try_new`](Self::try_new).
    pub fn new(
        binding: B,
        start_state: T,
        complete_state: T,
        duration: Time,
        interpolator: Interpolator,
    ) -> Self {
        match Self::try_new(binding, start_state, complete_state, duration, interpolator) {
            Ok(animation) => animation,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn try_new(
        binding: B,
        start_state: T,
        complete_state: T,
        duration: Time,
        interpolator: Interpolator,
    ) -> Result<Self> {
        if duration <= 0 {
            return Err(AnimationError::NonPositiveDuration(duration));
        }
        Ok(Self {
            binding,
            start_state,
            complete_state,
            duration,
            interpolator,
            start_time: NOT_STARTED,
        })
    }

    /// Linear animation between two explicit states
    pub fn from_to(binding: B, start_state: T, complete_state: T, duration: Time) -> Self {
        Self::new(
            binding,
            start_state,
            complete_state,
            duration,
            Interpolator::Linear,
        )
    }

    /// Linear animation from wherever the value is right now
    ///
    /// The start state is read from the binding at construction, not at
    /// `start`.
    pub fn to(binding: B, complete_state: T, duration: Time) -> Self {
        let start_state = binding.read();
        Self::from_to(binding, start_state, complete_state, duration)
    }

    /// Replace the interpolator (builder pattern)
    pub fn with_interpolator(mut self, interpolator: Interpolator) -> Self {
        self.interpolator = interpolator;
        self
    }

    pub fn start_state(&self) -> &T {
        &self.start_state
    }

    pub fn complete_state(&self) -> &T {
        &self.complete_state
    }

    pub fn interpolator(&self) -> &Interpolator {
        &self.interpolator
    }
}

impl<T: Blend, B: Binding<T>> Animation for PropertyAnimation<T, B> {
    fn start(&mut self, start_time: Time) {
        self.start_time = check_start_time(start_time);
    }

    fn poll(&mut self, now: Time) -> bool {
        assert_scheduled(self.start_time);

        if !self.started(now) {
            // Pre-roll: hold the start state until the window opens
            self.binding.write(self.start_state.clone());
            return true;
        }
        if self.complete(now) {
            self.binding.write(self.complete_state.clone());
            return false;
        }

        let ratio = self.elapsed(now) as f64 / self.duration as f64;
        let shaped = self.interpolator.value(ratio);
        self.binding
            .write(self.start_state.blend(&self.complete_state, shaped));
        true
    }

    fn stop(&mut self) {
        self.start_time = NOT_STARTED;
        self.binding.write(self.complete_state.clone());
    }

    fn duration(&self) -> Time {
        self.duration
    }

    fn start_time(&self) -> Time {
        self.start_time
    }
}
