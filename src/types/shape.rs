//! Cross-section record dimensions.

use std::fmt;

/// Dimensions `(T, X, Z)` of a cross-section record.
///
/// Provides a strongly-typed way to talk about the three axes,
/// preventing mix-ups between time, position and level counts.
///
/// # Example
///
/// ```
/// use sfd_rs::types::SectionShape;
///
/// let shape = SectionShape::new(48, 20, 10);
/// assert_eq!(shape.n_times(), 48);
/// assert_eq!(shape.n_positions(), 20);
/// assert_eq!(shape.n_levels(), 10);
/// assert_eq!(shape.n_samples(), 9600);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SectionShape {
    /// Number of time samples
    n_times: usize,
    /// Number of along-channel positions
    n_positions: usize,
    /// Number of depth levels
    n_levels: usize,
}

impl SectionShape {
    /// Create a new shape.
    ///
    /// Zero-length axes are allowed here; `SectionFields` rejects them.
    pub const fn new(n_times: usize, n_positions: usize, n_levels: usize) -> Self {
        Self {
            n_times,
            n_positions,
            n_levels,
        }
    }

    /// Number of time samples (T).
    #[inline]
    pub fn n_times(&self) -> usize {
        self.n_times
    }

    /// Number of along-channel positions (X).
    #[inline]
    pub fn n_positions(&self) -> usize {
        self.n_positions
    }

    /// Number of depth levels (Z).
    #[inline]
    pub fn n_levels(&self) -> usize {
        self.n_levels
    }

    /// Total number of samples `T * X * Z`.
    #[inline]
    pub fn n_samples(&self) -> usize {
        self.n_times * self.n_positions * self.n_levels
    }

    /// Canonical axis of the first zero-length dimension, if any.
    pub fn first_empty_axis(&self) -> Option<usize> {
        self.as_array().iter().position(|&n| n == 0)
    }

    /// Return as `[T, X, Z]`.
    #[inline]
    pub fn as_array(&self) -> [usize; 3] {
        [self.n_times, self.n_positions, self.n_levels]
    }
}

impl fmt::Display for SectionShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}×{}×{}", self.n_times, self.n_positions, self.n_levels)
    }
}

impl From<[usize; 3]> for SectionShape {
    fn from([t, x, z]: [usize; 3]) -> Self {
        Self::new(t, x, z)
    }
}

impl From<SectionShape> for [usize; 3] {
    fn from(shape: SectionShape) -> Self {
        shape.as_array()
    }
}
