//! Interpolators (easing curves)
//!
//! An interpolator maps a normalized progress ratio to a shaped ratio. The
//! input is always clamped to `[0, 1]` first; the output is not clamped, so
//! curves such as [`Interpolator::Back`] may leave the unit range.

use std::f64::consts::FRAC_PI_2;
use std::fmt;

/// Default exponent of [`Interpolator::power`]
pub const DEFAULT_POWER: f64 = 2.0;
/// Default overshoot of [`Interpolator::back`]
pub const DEFAULT_OVERFLOW: f64 = 1.70158;
/// Default rate of [`Interpolator::exponential`]
pub const DEFAULT_LAMBDA: f64 = 0.1;

/// Easing curve applied to an animation's progress ratio
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Interpolator {
    /// `r`
    #[default]
    Linear,
    /// `r^power` (ease-in)
    Power { power: f64 },
    /// `(overflow + 1)·r^(power + 1) − overflow·r^power`
    ///
    /// Dips below zero near the start before settling.
    Back { overflow: f64, power: f64 },
    /// `sin(r·π/2)` (ease-out)
    Sine,
    /// `exp(lambda − lambda/r)`, with `0` at `r = 0`
    Exponential { lambda: f64 },
    /// `1 − inner(1 − r)`: time-reverses the wrapped curve
    Inverse(Box<Interpolator>),
}

impl Interpolator {
    /// Quadratic ease-in
    pub fn power() -> Self {
        Self::with_power(DEFAULT_POWER)
    }

    pub fn with_power(power: f64) -> Self {
        Interpolator::Power { power }
    }

    /// Back ease-in with the classic 1.70158 overshoot
    pub fn back() -> Self {
        Self::with_back(DEFAULT_OVERFLOW, DEFAULT_POWER)
    }

    pub fn with_back(overflow: f64, power: f64) -> Self {
        Interpolator::Back { overflow, power }
    }

    pub fn exponential() -> Self {
        Self::with_lambda(DEFAULT_LAMBDA)
    }

    pub fn with_lambda(lambda: f64) -> Self {
        Interpolator::Exponential { lambda }
    }

    /// Wrap this curve so that it runs backwards in time
    ///
    /// Turns an ease-in curve into the matching ease-out curve.
    pub fn inverse(self) -> Self {
        Interpolator::Inverse(Box::new(self))
    }

    /// Shape a progress ratio
    ///
    /// Out-of-range input is clamped to `[0, 1]` rather than rejected.
    pub fn value(&self, ratio: f64) -> f64 {
        self.shape(normalize(ratio))
    }

    fn shape(&self, r: f64) -> f64 {
        match self {
            Interpolator::Linear => r,
            Interpolator::Power { power } => r.powf(*power),
            Interpolator::Back { overflow, power } => {
                (overflow + 1.0) * r.powf(power + 1.0) - overflow * r.powf(*power)
            }
            Interpolator::Sine => (r * FRAC_PI_2).sin(),
            Interpolator::Exponential { lambda } => {
                // Removable singularity: the curve tends to 0 as r -> 0+
                if r == 0.0 {
                    0.0
                } else {
                    (lambda - lambda / r).exp()
                }
            }
            Interpolator::Inverse(inner) => 1.0 - inner.value(1.0 - r),
        }
    }
}

fn normalize(ratio: f64) -> f64 {
    // NaN maps to the start of the curve
    if ratio.is_nan() {
        return 0.0;
    }
    ratio.clamp(0.0, 1.0)
}

impl fmt::Display for Interpolator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Interpolator::Linear => write!(f, "linear"),
            Interpolator::Power { power } => write!(f, "power({power})"),
            Interpolator::Back { overflow, power } => write!(f, "back({overflow}, {power})"),
            Interpolator::Sine => write!(f, "sine"),
            Interpolator::Exponential { lambda } => write!(f, "exponential({lambda})"),
            Interpolator::Inverse(inner) => write!(f, "inverse({inner})"),
        }
    }
}
