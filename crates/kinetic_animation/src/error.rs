//! Animation error types
//!
//! Every variant describes a caller contract violation. The infallible entry
//! points panic with the variant's message; the `try_*` entry points hand it
//! back instead.

use thiserror::Error;

use crate::time::Time;

/// Contract violations detected by the animation engine
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationError {
    /// A leaf was constructed with a zero or negative duration
    #[error("animation duration must be positive, got {0}")]
    NonPositiveDuration(Time),

    /// A group's structure was mutated after `start`
    #[error("cannot add or remove children after the group has started")]
    GroupStarted,

    /// A timing query or poll was issued before `start`
    #[error("animation has not been started")]
    NotStarted,

    /// `start` was called with the reserved not-started timestamp
    #[error("start time must be less than the not-started sentinel")]
    InvalidStartTime,
}

/// Result type for animation operations
pub type Result<T> = std::result::Result<T, AnimationError>;
