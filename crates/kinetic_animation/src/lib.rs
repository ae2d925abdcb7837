//! Kinetic Animation Engine
//!
//! Time-driven property animations, composable into sequential and parallel
//! groups, polled once per external tick.
//!
//! # Features
//!
//! - **Property Animations**: Blend any externally owned value between two states
//! - **Interpolators**: Linear, power, back, sine, exponential and inverted curves
//! - **Groups**: Sequential and parallel composition, nestable to any depth
//! - **Catch-up**: A late poll completes every window that has already elapsed
//! - **Injected Time**: The core never reads a clock; drivers pass `now` in
//!
//! # Example
//!
//! ```
//! use kinetic_animation::{Animation, PropertyAnimation};
//!
//! let mut x = 0.0_f32;
//! let mut anim = PropertyAnimation::from_to(&mut x, 0.0, 10.0, 1000);
//! anim.start(0);
//! assert!(anim.poll(500));
//! assert!(!anim.poll(1000));
//! drop(anim);
//! assert_eq!(x, 10.0);
//! ```

pub mod animation;
pub mod binding;
pub mod driver;
pub mod error;
pub mod group;
pub mod interpolator;
pub mod property;
pub mod time;
pub mod values;

pub use animation::{Animation, BoxedAnimation};
pub use binding::Binding;
pub use driver::{Clocked, Player};
pub use error::{AnimationError, Result};
pub use group::{AnimationGroup, ChildId, ParallelAnimationGroup, SequentialAnimationGroup};
pub use interpolator::Interpolator;
pub use property::PropertyAnimation;
pub use time::{ManualClock, SystemClock, Time, TimeSource, NOT_STARTED};
pub use values::Blend;
