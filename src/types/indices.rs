//! Strongly-typed index newtypes.
//!
//! These types prevent mixing up the three axes of a cross-section record
//! (time step vs along-channel position vs depth level).

use std::fmt;

/// Macro to generate index newtypes with common functionality.
macro_rules! define_index {
    (
        $(#[$meta:meta])*
        $name:ident, $display_prefix:literal
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(transparent)]
        pub struct $name(usize);

        impl $name {
            /// Create a new index.
            #[inline]
            pub const fn new(index: usize) -> Self {
                Self(index)
            }

            /// Get the raw index value.
            #[inline]
            pub const fn get(self) -> usize {
                self.0
            }

            /// First index (0).
            pub const ZERO: Self = Self(0);

            /// Create an iterator over [0, n) indices.
            pub fn iter(n: usize) -> impl ExactSizeIterator<Item = $name> {
                (0..n).map($name)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, self.0)
            }
        }

        impl From<usize> for $name {
            #[inline]
            fn from(index: usize) -> Self {
                Self(index)
            }
        }

        impl From<$name> for usize {
            #[inline]
            fn from(idx: $name) -> usize {
                idx.0
            }
        }

        impl<T> std::ops::Index<$name> for [T] {
            type Output = T;
            #[inline]
            fn index(&self, idx: $name) -> &T {
                &self[idx.0]
            }
        }

        impl<T> std::ops::Index<$name> for Vec<T> {
            type Output = T;
            #[inline]
            fn index(&self, idx: $name) -> &T {
                &self[idx.0]
            }
        }
    };
}

define_index!(
    /// Time step index into a cross-section record.
    ///
    /// # Example
    ///
    /// ```
    /// use sfd_rs::types::TimeIndex;
    ///
    /// let t = TimeIndex::new(12);
    /// assert_eq!(t.get(), 12);
    /// assert_eq!(t.to_string(), "t12");
    /// ```
    TimeIndex,
    "t"
);

define_index!(
    /// Along-channel position index.
    ///
    /// Rows of a flux decomposition are ordered by this index.
    ///
    /// # Example
    ///
    /// ```
    /// use sfd_rs::types::PositionIndex;
    ///
    /// let x = PositionIndex::new(3);
    /// assert_eq!(x.get(), 3);
    /// ```
    PositionIndex,
    "x"
);

define_index!(
    /// Depth level index.
    ///
    /// # Example
    ///
    /// ```
    /// use sfd_rs::types::LevelIndex;
    ///
    /// let indices: Vec<_> = LevelIndex::iter(10).collect();
    /// assert_eq!(indices.len(), 10);
    /// assert_eq!(indices[9].get(), 9);
    /// ```
    LevelIndex,
    "z"
);

/// Canonical `(time, position, level)` index of a single sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SampleIndex {
    /// Time step
    pub time: TimeIndex,
    /// Along-channel position
    pub position: PositionIndex,
    /// Depth level
    pub level: LevelIndex,
}

impl SampleIndex {
    /// Create a sample index from raw `(t, x, z)` components.
    pub fn new(t: usize, x: usize, z: usize) -> Self {
        Self {
            time: TimeIndex::new(t),
            position: PositionIndex::new(x),
            level: LevelIndex::new(z),
        }
    }

    /// Raw `[t, x, z]` index, usable with `ndarray` indexing.
    #[inline]
    pub fn as_array(&self) -> [usize; 3] {
        [self.time.get(), self.position.get(), self.level.get()]
    }
}

impl fmt::Display for SampleIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.time, self.position, self.level)
    }
}

impl From<(usize, usize, usize)> for SampleIndex {
    fn from((t, x, z): (usize, usize, usize)) -> Self {
        Self::new(t, x, z)
    }
}
