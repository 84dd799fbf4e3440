//! Axis layout of caller-supplied arrays.

use crate::error::InvalidInput;

/// Which axes of the input arrays hold time and depth.
///
/// The remaining axis is the along-channel position. Inputs are permuted
/// into canonical `(time, position, depth)` order at construction, which
/// for `ndarray` only rearranges strides.
///
/// # Example
///
/// ```
/// use sfd_rs::types::AxisLayout;
///
/// // Arrays stored as (depth, time, position)
/// let layout = AxisLayout::new(1, 0);
/// assert_eq!(layout.position(), 2);
/// assert_eq!(layout.canonical_order(), [1, 2, 0]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AxisLayout {
    time: usize,
    depth: usize,
}

impl AxisLayout {
    /// Create a layout from the time and depth axis numbers.
    ///
    /// Validity is checked by [`AxisLayout::validate`] when the layout is
    /// applied.
    pub const fn new(time: usize, depth: usize) -> Self {
        Self { time, depth }
    }

    /// Time axis number.
    #[inline]
    pub fn time(&self) -> usize {
        self.time
    }

    /// Depth axis number.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Along-channel axis number (the one that is neither time nor depth).
    ///
    /// Only meaningful for a validated layout.
    #[inline]
    pub fn position(&self) -> usize {
        (0..3)
            .find(|&axis| axis != self.time && axis != self.depth)
            .unwrap_or(1)
    }

    /// Check that both axes exist and differ.
    pub fn validate(&self) -> Result<(), InvalidInput> {
        for axis in [self.time, self.depth] {
            if axis > 2 {
                return Err(InvalidInput::AxisOutOfRange { axis });
            }
        }
        if self.time == self.depth {
            return Err(InvalidInput::DuplicateAxis { axis: self.time });
        }
        Ok(())
    }

    /// Axis permutation taking caller order to `(time, position, depth)`.
    ///
    /// Only meaningful for a validated layout.
    #[inline]
    pub fn canonical_order(&self) -> [usize; 3] {
        [self.time, self.position(), self.depth]
    }

    /// Map a canonical axis number (0 = time, 1 = position, 2 = depth)
    /// back to the caller's axis number.
    #[inline]
    pub fn caller_axis(&self, canonical: usize) -> usize {
        self.canonical_order()[canonical]
    }

    /// Is this the canonical `(time, position, depth)` layout?
    pub fn is_canonical(&self) -> bool {
        self.time == 0 && self.depth == 2
    }
}

impl Default for AxisLayout {
    /// Time first, depth last.
    fn default() -> Self {
        Self::new(0, 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_canonical() {
        let layout = AxisLayout::default();
        assert!(layout.is_canonical());
        assert_eq!(layout.canonical_order(), [0, 1, 2]);
        assert!(layout.validate().is_ok());
    }

    #[test]
    fn test_position_axis() {
        assert_eq!(AxisLayout::new(2, 0).position(), 1);
        assert_eq!(AxisLayout::new(1, 2).position(), 0);
        assert_eq!(AxisLayout::new(1, 2).caller_axis(2), 2);
        assert_eq!(AxisLayout::new(1, 2).caller_axis(1), 0);
    }

    #[test]
    fn test_invalid_layouts() {
        assert_eq!(
            AxisLayout::new(3, 0).validate(),
            Err(InvalidInput::AxisOutOfRange { axis: 3 })
        );
        assert_eq!(
            AxisLayout::new(1, 1).validate(),
            Err(InvalidInput::DuplicateAxis { axis: 1 })
        );
    }
}
