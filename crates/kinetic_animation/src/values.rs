//! Blendable value types
//!
//! A property can be animated if two snapshots of it can be mixed by a scalar
//! weight. Scalars and fixed-size arrays (vectors, colors) are provided.

/// Values that support `(1 − t)·a + t·b`
///
/// `t` is the shaped ratio produced by an [`Interpolator`](crate::Interpolator)
/// and may fall outside `[0, 1]` for overshooting curves.
pub trait Blend: Clone {
    fn blend(&self, other: &Self, t: f64) -> Self;
}

// ============================================================================
// Scalars
// ============================================================================

impl Blend for f64 {
    fn blend(&self, other: &Self, t: f64) -> Self {
        (1.0 - t) * self + t * other
    }
}

impl Blend for f32 {
    fn blend(&self, other: &Self, t: f64) -> Self {
        f64::from(*self).blend(&f64::from(*other), t) as f32
    }
}

// ============================================================================
// Vectors
// ============================================================================

impl<T: Blend, const N: usize> Blend for [T; N] {
    fn blend(&self, other: &Self, t: f64) -> Self {
        std::array::from_fn(|i| self[i].blend(&other[i], t))
    }
}
