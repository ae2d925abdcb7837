//! Animation groups
//!
//! Composite animations that own an ordered set of child animations.
//! [`SequentialAnimationGroup`] runs children back-to-back and
//! [`ParallelAnimationGroup`] runs them side by side. Both are animations
//! themselves, so groups nest to any depth.
//!
//! A group is the sole owner of its children. Children are destroyed when
//! they finish, when the group is stopped, or when the group is dropped.
//! Structure can only change before `start`.

use std::collections::VecDeque;
use std::fmt;

use slotmap::{new_key_type, SlotMap};

use crate::animation::{assert_scheduled, check_start_time, Animation, BoxedAnimation};
use crate::error::{AnimationError, Result};
use crate::time::{Time, NOT_STARTED};

new_key_type! {
    /// Handle to a child inside a group, returned by `add`
    pub struct ChildId;
}

/// Structural operations shared by every group
pub trait AnimationGroup<'a>: Animation {
    /// Take ownership of `child`
    ///
    /// Fails with [`AnimationError::GroupStarted`] once the group is running.
    fn try_add(&mut self, child: BoxedAnimation<'a>) -> Result<ChildId>;

    /// Destroy the child behind `id`, returning whether it was present
    ///
    /// An unknown id is not an error. Fails with
    /// [`AnimationError::GroupStarted`] once the group is running.
    fn try_remove(&mut self, id: ChildId) -> Result<bool>;

    fn len(&self) -> usize;

    fn contains(&self, id: ChildId) -> bool;

    /// # Panics
    ///
    /// Panics if the group has been started.
    fn add(&mut self, child: BoxedAnimation<'a>) -> ChildId {
        match self.try_add(child) {
            Ok(id) => id,
            Err(err) => panic!("{err}"),
        }
    }

    /// # Panics
    ///
    /// Panics if the group has been started.
    fn remove(&mut self, id: ChildId) -> bool {
        match self.try_remove(id) {
            Ok(removed) => removed,
            Err(err) => panic!("{err}"),
        }
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ============================================================================
// Child storage
// ============================================================================

/// Owned children plus their insertion order
#[derive(Default)]
struct Children<'a> {
    slots: SlotMap<ChildId, BoxedAnimation<'a>>,
    order: VecDeque<ChildId>,
}

impl<'a> Children<'a> {
    fn insert(&mut self, child: BoxedAnimation<'a>) -> ChildId {
        let id = self.slots.insert(child);
        self.order.push_back(id);
        id
    }

    fn remove(&mut self, id: ChildId) -> Option<BoxedAnimation<'a>> {
        let child = self.slots.remove(id)?;
        self.order.retain(|other| *other != id);
        Some(child)
    }

    fn iter(&self) -> impl Iterator<Item = &BoxedAnimation<'a>> + '_ {
        self.order.iter().filter_map(|id| self.slots.get(*id))
    }

    fn for_each_mut(&mut self, mut f: impl FnMut(&mut BoxedAnimation<'a>)) {
        for id in &self.order {
            if let Some(child) = self.slots.get_mut(*id) {
                f(child);
            }
        }
    }

    fn front_mut(&mut self) -> Option<(ChildId, &mut BoxedAnimation<'a>)> {
        let id = *self.order.front()?;
        self.slots.get_mut(id).map(|child| (id, child))
    }

    fn pop_front(&mut self) {
        if let Some(id) = self.order.pop_front() {
            drop(self.slots.remove(id));
        }
    }

    /// Force-stop and destroy every child, in order
    fn stop_all(&mut self) {
        while let Some(id) = self.order.pop_front() {
            if let Some(mut child) = self.slots.remove(id) {
                child.stop();
            }
        }
        self.slots.clear();
    }

    fn len(&self) -> usize {
        self.order.len()
    }

    fn contains(&self, id: ChildId) -> bool {
        self.slots.contains_key(id)
    }
}

// ============================================================================
// Sequential
// ============================================================================

/// Runs its children one after another
///
/// Duration is the sum of the children's durations. Child `i` is anchored at
/// `t0 + d0 + … + d(i-1)` when the group starts. A poll that lands past
/// several children's windows completes all of them in that one call.
pub struct SequentialAnimationGroup<'a> {
    children: Children<'a>,
    duration: Time,
    start_time: Time,
}

impl<'a> SequentialAnimationGroup<'a> {
    pub fn new() -> Self {
        Self {
            children: Children::default(),
            duration: 0,
            start_time: NOT_STARTED,
        }
    }

    /// Append a child (builder pattern)
    ///
    /// # Panics
    ///
    /// Panics if the group has been started.
    pub fn with(mut self, child: impl Animation + 'a) -> Self {
        self.push(child);
        self
    }

    /// Append a child, boxing it
    pub fn push(&mut self, child: impl Animation + 'a) -> ChildId {
        self.add(Box::new(child))
    }

    /// Start times assigned to the remaining children, in order
    pub fn child_start_times(&self) -> Vec<Time> {
        self.children.iter().map(|child| child.start_time()).collect()
    }
}

impl Default for SequentialAnimationGroup<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Animation for SequentialAnimationGroup<'a> {
    fn start(&mut self, start_time: Time) {
        self.start_time = check_start_time(start_time);
        tracing::debug!(
            start_time,
            children = self.children.len(),
            duration = self.duration,
            "sequential group started"
        );

        let mut offset = start_time;
        self.children.for_each_mut(|child| {
            child.start(offset);
            offset = offset.saturating_add(child.duration());
        });
    }

    fn poll(&mut self, now: Time) -> bool {
        assert_scheduled(self.start_time);

        while let Some((id, child)) = self.children.front_mut() {
            if child.poll(now) {
                return true;
            }
            tracing::trace!(?id, now, "sequential child finished");
            self.children.pop_front();
        }
        false
    }

    fn stop(&mut self) {
        tracing::debug!(children = self.children.len(), "sequential group stopped");
        self.start_time = NOT_STARTED;
        self.children.stop_all();
        self.duration = 0;
    }

    fn duration(&self) -> Time {
        self.duration
    }

    fn start_time(&self) -> Time {
        self.start_time
    }
}

impl<'a> AnimationGroup<'a> for SequentialAnimationGroup<'a> {
    fn try_add(&mut self, child: BoxedAnimation<'a>) -> Result<ChildId> {
        if self.is_scheduled() {
            return Err(AnimationError::GroupStarted);
        }
        self.duration = self.duration.saturating_add(child.duration());
        Ok(self.children.insert(child))
    }

    fn try_remove(&mut self, id: ChildId) -> Result<bool> {
        if self.is_scheduled() {
            return Err(AnimationError::GroupStarted);
        }
        if self.children.remove(id).is_none() {
            return Ok(false);
        }
        // A saturated sum cannot be undone by subtraction
        self.duration = self
            .children
            .iter()
            .fold(0, |total: Time, child| total.saturating_add(child.duration()));
        Ok(true)
    }

    fn len(&self) -> usize {
        self.children.len()
    }

    fn contains(&self, id: ChildId) -> bool {
        self.children.contains(id)
    }
}

impl fmt::Debug for SequentialAnimationGroup<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SequentialAnimationGroup")
            .field("children", &self.children.len())
            .field("duration", &self.duration)
            .field("start_time", &self.start_time)
            .finish()
    }
}

// ============================================================================
// Parallel
// ============================================================================

/// Runs all of its children from the same start time
///
/// Duration is the longest child's duration. Each child is dropped as soon as
/// it reports finished, independently of its siblings, and the group stays
/// active while any child remains.
pub struct ParallelAnimationGroup<'a> {
    children: Children<'a>,
    duration: Time,
    start_time: Time,
}

impl<'a> ParallelAnimationGroup<'a> {
    pub fn new() -> Self {
        Self {
            children: Children::default(),
            duration: 0,
            start_time: NOT_STARTED,
        }
    }

    /// Add a child (builder pattern)
    ///
    /// # Panics
    ///
    /// Panics if the group has been started.
    pub fn with(mut self, child: impl Animation + 'a) -> Self {
        self.push(child);
        self
    }

    pub fn push(&mut self, child: impl Animation + 'a) -> ChildId {
        self.add(Box::new(child))
    }

    /// Start times of the remaining children, in order
    pub fn child_start_times(&self) -> Vec<Time> {
        self.children.iter().map(|child| child.start_time()).collect()
    }
}

impl Default for ParallelAnimationGroup<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Animation for ParallelAnimationGroup<'a> {
    fn start(&mut self, start_time: Time) {
        self.start_time = check_start_time(start_time);
        tracing::debug!(
            start_time,
            children = self.children.len(),
            duration = self.duration,
            "parallel group started"
        );

        self.children.for_each_mut(|child| child.start(start_time));
    }

    fn poll(&mut self, now: Time) -> bool {
        assert_scheduled(self.start_time);

        let Children { slots, order } = &mut self.children;
        order.retain(|id| {
            let Some(child) = slots.get_mut(*id) else {
                return false;
            };
            if child.poll(now) {
                return true;
            }
            tracing::trace!(?id, now, "parallel child finished");
            drop(slots.remove(*id));
            false
        });
        !order.is_empty()
    }

    fn stop(&mut self) {
        tracing::debug!(children = self.children.len(), "parallel group stopped");
        self.start_time = NOT_STARTED;
        self.children.stop_all();
        self.duration = 0;
    }

    fn duration(&self) -> Time {
        self.duration
    }

    fn start_time(&self) -> Time {
        self.start_time
    }
}

impl<'a> AnimationGroup<'a> for ParallelAnimationGroup<'a> {
    fn try_add(&mut self, child: BoxedAnimation<'a>) -> Result<ChildId> {
        if self.is_scheduled() {
            return Err(AnimationError::GroupStarted);
        }
        self.duration = self.duration.max(child.duration());
        Ok(self.children.insert(child))
    }

    fn try_remove(&mut self, id: ChildId) -> Result<bool> {
        if self.is_scheduled() {
            return Err(AnimationError::GroupStarted);
        }
        if self.children.remove(id).is_none() {
            return Ok(false);
        }
        // Any removed child may have held the maximum
        self.duration = self
            .children
            .iter()
            .map(|child| child.duration())
            .max()
            .unwrap_or(0);
        Ok(true)
    }

    fn len(&self) -> usize {
        self.children.len()
    }

    fn contains(&self, id: ChildId) -> bool {
        self.children.contains(id)
    }
}

impl fmt::Debug for ParallelAnimationGroup<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParallelAnimationGroup")
            .field("children", &self.children.len())
            .field("duration", &self.duration)
            .field("start_time", &self.start_time)
            .finish()
    }
}
