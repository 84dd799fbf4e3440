//! Error types for cross-section validation.
//!
//! All errors are raised while building [`SectionFields`](crate::SectionFields),
//! before any reduction runs. The decomposition itself cannot fail.

use crate::types::{FieldKind, SampleIndex};
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SfdError>;

/// Errors from constructing a decomposition.
#[derive(Debug, Error)]
pub enum SfdError {
    /// The three input fields disagree in shape.
    ///
    /// Shapes are reported in the caller's axis order.
    #[error(
        "`flow`, `salinity`, and `cross_section` must all have the same shape; \
         flow={flow:?}, salinity={salinity:?}, cross_section={cross_section:?}"
    )]
    ShapeMismatch {
        flow: Vec<usize>,
        salinity: Vec<usize>,
        cross_section: Vec<usize>,
    },

    /// An input is malformed (empty, non-finite, wrong rank, ...).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),
}

impl SfdError {
    /// True for [`SfdError::ShapeMismatch`].
    pub fn is_shape_mismatch(&self) -> bool {
        matches!(self, SfdError::ShapeMismatch { .. })
    }

    /// True for [`SfdError::InvalidInput`].
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, SfdError::InvalidInput(_))
    }
}

/// Reason an input was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInput {
    /// Field is not three-dimensional.
    #[error("{field} must be three-dimensional, got {ndim} dimensions")]
    Rank { field: FieldKind, ndim: usize },

    /// Field has no samples along an axis (caller's axis order).
    #[error("{field} has zero length along axis {axis}")]
    EmptyAxis { field: FieldKind, axis: usize },

    /// Field holds NaN or infinity at a valid sample.
    #[error("{field} contains non-finite value {value} at {index}")]
    NonFinite {
        field: FieldKind,
        index: SampleIndex,
        value: f64,
    },

    /// Validity mask does not match the field shape.
    #[error("mask shape {mask:?} does not match field shape {fields:?}")]
    MaskShape { mask: Vec<usize>, fields: Vec<usize> },

    /// Axis number is not 0, 1 or 2.
    #[error("axis {axis} is out of range for a three-dimensional array")]
    AxisOutOfRange { axis: usize },

    /// Time and depth axes coincide.
    #[error("time and depth axes must differ, both are {axis}")]
    DuplicateAxis { axis: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_mismatch_message() {
        let err = SfdError::ShapeMismatch {
            flow: vec![10, 8, 10],
            salinity: vec![10, 10, 10],
            cross_section: vec![10, 10, 10],
        };
        let msg = err.to_string();
        assert!(msg.contains("flow=[10, 8, 10]"), "got: {msg}");
        assert!(err.is_shape_mismatch());
        assert!(!err.is_invalid_input());
    }

    #[test]
    fn test_invalid_input_conversion() {
        let err: SfdError = InvalidInput::EmptyAxis {
            field: FieldKind::Salinity,
            axis: 2,
        }
        .into();
        assert!(err.is_invalid_input());
        assert_eq!(
            err.to_string(),
            "invalid input: salinity has zero length along axis 2"
        );
    }

    #[test]
    fn test_non_finite_message() {
        let reason = InvalidInput::NonFinite {
            field: FieldKind::Flow,
            index: SampleIndex::new(0, 1, 2),
            value: f64::NAN,
        };
        assert_eq!(reason.to_string(), "flow contains non-finite value NaN at (t0, x1, z2)");
    }
}
