//! Builder for [`SectionFields`].

use super::SectionFields;
use crate::error::{InvalidInput, Result, SfdError};
use crate::types::{AxisLayout, FieldKind, SampleIndex};
use ndarray::{Array3, ArrayView3};

/// Builder for a validated cross-section record.
///
/// Defaults: canonical `(time, position, depth)` layout, no mask,
/// non-finite samples rejected.
#[derive(Clone, Debug)]
pub struct SectionFieldsBuilder {
    flow: Array3<f64>,
    salinity: Array3<f64>,
    cross_section: Array3<f64>,
    /// Axis layout of the supplied arrays.
    layout: AxisLayout,
    /// Validity mask in the same layout as the fields (`true` = valid).
    mask: Option<Array3<bool>>,
    /// Admit NaN/Inf at valid samples instead of rejecting them.
    allow_non_finite: bool,
}

impl SectionFieldsBuilder {
    /// Create a builder from the three input arrays.
    pub fn new(flow: Array3<f64>, salinity: Array3<f64>, cross_section: Array3<f64>) -> Self {
        Self {
            flow,
            salinity,
            cross_section,
            layout: AxisLayout::default(),
            mask: None,
            allow_non_finite: false,
        }
    }

    /// Set the axis layout the arrays are stored in.
    pub fn with_layout(mut self, layout: AxisLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Set a validity mask (`true` = valid sample), same layout as the fields.
    ///
    /// Masked samples are excluded from every reduction; their values are
    /// never read.
    pub fn with_mask(mut self, mask: Array3<bool>) -> Self {
        self.mask = Some(mask);
        self
    }

    /// Admit non-finite samples. They propagate into the affected positions
    /// of the result.
    pub fn allow_non_finite(mut self, allow: bool) -> Self {
        self.allow_non_finite = allow;
        self
    }

    /// Validate and build.
    ///
    /// Checks, in order: layout, equal shapes, non-empty axes, mask shape,
    /// finiteness of valid samples.
    pub fn build(self) -> Result<SectionFields> {
        self.layout.validate()?;

        let shape = self.flow.shape().to_vec();
        if self.salinity.shape() != shape.as_slice() || self.cross_section.shape() != shape.as_slice()
        {
            return Err(SfdError::ShapeMismatch {
                flow: shape,
                salinity: self.salinity.shape().to_vec(),
                cross_section: self.cross_section.shape().to_vec(),
            });
        }

        if let Some(axis) = shape.iter().position(|&n| n == 0) {
            return Err(InvalidInput::EmptyAxis {
                field: FieldKind::Flow,
                axis,
            }
            .into());
        }

        if let Some(mask) = &self.mask {
            if mask.shape() != shape.as_slice() {
                return Err(InvalidInput::MaskShape {
                    mask: mask.shape().to_vec(),
                    fields: shape,
                }
                .into());
            }
        }

        let order = self.layout.canonical_order();
        let flow = self.flow.permuted_axes(order);
        let salinity = self.salinity.permuted_axes(order);
        let cross_section = self.cross_section.permuted_axes(order);
        let mask = self.mask.map(|m| m.permuted_axes(order));

        let mut non_finite = 0;
        for (kind, field) in [
            (FieldKind::Flow, &flow),
            (FieldKind::Salinity, &salinity),
            (FieldKind::CrossSection, &cross_section),
        ] {
            let mask = mask.as_ref().map(|m| m.view());
            match first_non_finite(field.view(), mask) {
                Some((index, value)) if !self.allow_non_finite => {
                    return Err(InvalidInput::NonFinite {
                        field: kind,
                        index,
                        value,
                    }
                    .into());
                }
                Some(_) => non_finite += count_non_finite(field.view(), mask),
                None => {}
            }
        }

        let fields = SectionFields::from_parts(flow, salinity, cross_section, mask, self.layout);
        if non_finite > 0 {
            log::warn!(
                "cross-section record {} admitted with {} non-finite samples",
                fields.shape(),
                non_finite
            );
        }
        log::debug!(
            "validated cross-section record {} ({} valid samples, layout time={} depth={})",
            fields.shape(),
            fields.n_valid(),
            self.layout.time(),
            self.layout.depth()
        );
        Ok(fields)
    }
}

/// First non-finite valid sample in row-major `(t, x, z)` order.
fn first_non_finite(
    field: ArrayView3<'_, f64>,
    mask: Option<ArrayView3<'_, bool>>,
) -> Option<(SampleIndex, f64)> {
    field
        .indexed_iter()
        .find(|&((t, x, z), v)| !v.is_finite() && mask.is_none_or(|m| m[[t, x, z]]))
        .map(|(index, &v)| (SampleIndex::from(index), v))
}

fn count_non_finite(field: ArrayView3<'_, f64>, mask: Option<ArrayView3<'_, bool>>) -> usize {
    field
        .indexed_iter()
        .filter(|&((t, x, z), v)| !v.is_finite() && mask.is_none_or(|m| m[[t, x, z]]))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arrays(dim: (usize, usize, usize)) -> (Array3<f64>, Array3<f64>, Array3<f64>) {
        (
            Array3::ones(dim),
            Array3::from_elem(dim, 30.0),
            Array3::ones(dim),
        )
    }

    #[test]
    fn test_shape_mismatch_all_permutations() {
        for odd in 0..3 {
            let (mut u, mut s, mut a) = arrays((4, 5, 6));
            match odd {
                0 => u = Array3::ones((4, 5, 7)),
                1 => s = Array3::ones((3, 5, 6)),
                _ => a = Array3::ones((4, 6, 6)),
            }
            let err = SectionFieldsBuilder::new(u, s, a).build().unwrap_err();
            assert!(err.is_shape_mismatch(), "case {odd}: {err}");
        }
    }

    #[test]
    fn test_empty_axis_rejected() {
        for axis in 0..3 {
            let mut dim = [3, 3, 3];
            dim[axis] = 0;
            let (u, s, a) = arrays((dim[0], dim[1], dim[2]));
            let err = SectionFieldsBuilder::new(u, s, a).build().unwrap_err();
            assert!(matches!(
                err,
                SfdError::InvalidInput(InvalidInput::EmptyAxis { axis: found, .. }) if found == axis
            ));
        }
    }

    #[test]
    fn test_non_finite_rejected_with_location() {
        let (u, mut s, a) = arrays((2, 3, 4));
        s[[1, 2, 3]] = f64::INFINITY;
        let err = SectionFieldsBuilder::new(u, s, a).build().unwrap_err();
        match err {
            SfdError::InvalidInput(InvalidInput::NonFinite { field, index, value }) => {
                assert_eq!(field, FieldKind::Salinity);
                assert_eq!(index, SampleIndex::new(1, 2, 3));
                assert!(value.is_infinite());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_finite_allowed() {
        let (mut u, s, a) = arrays((2, 3, 4));
        u[[0, 0, 0]] = f64::NAN;
        let fields = SectionFieldsBuilder::new(u, s, a)
            .allow_non_finite(true)
            .build()
            .unwrap();
        assert!(fields.flow()[[0, 0, 0]].is_nan());
    }

    #[test]
    fn test_masked_non_finite_is_ignored() {
        let (mut u, s, a) = arrays((2, 3, 4));
        u[[1, 1, 1]] = f64::NAN;
        let mut mask = Array3::from_elem((2, 3, 4), true);
        mask[[1, 1, 1]] = false;
        assert!(SectionFieldsBuilder::new(u, s, a).with_mask(mask).build().is_ok());
    }

    #[test]
    fn test_mask_shape_rejected() {
        let (u, s, a) = arrays((2, 3, 4));
        let err = SectionFieldsBuilder::new(u, s, a)
            .with_mask(Array3::from_elem((2, 3, 5), true))
            .build()
            .unwrap_err();
        assert!(matches!(err, SfdError::InvalidInput(InvalidInput::MaskShape { .. })));
    }

    #[test]
    fn test_invalid_layout_rejected() {
        let (u, s, a) = arrays((2, 3, 4));
        let err = SectionFieldsBuilder::new(u, s, a)
            .with_layout(AxisLayout::new(2, 2))
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            SfdError::InvalidInput(InvalidInput::DuplicateAxis { axis: 2 })
        ));
    }

    #[test]
    fn test_layout_permutes_to_canonical() {
        // Stored as (depth, position, time)
        let u = Array3::from_shape_fn((4, 3, 2), |(z, x, t)| (100 * t + 10 * x + z) as f64);
        let s = Array3::from_elem((4, 3, 2), 30.0);
        let a = Array3::ones((4, 3, 2));
        let fields = SectionFieldsBuilder::new(u, s, a)
            .with_layout(AxisLayout::new(2, 0))
            .build()
            .unwrap();
        assert_eq!(fields.shape().as_array(), [2, 3, 4]);
        assert_eq!(fields.flow()[[1, 2, 3]], 123.0);
    }

    #[test]
    fn test_shape_mismatch_reported_in_caller_order() {
        let u = Array3::ones((4, 3, 2));
        let s = Array3::ones((4, 3, 2));
        let a = Array3::ones((4, 1, 2));
        let err = SectionFieldsBuilder::new(u, s, a)
            .with_layout(AxisLayout::new(2, 0))
            .build()
            .unwrap_err();
        match err {
            SfdError::ShapeMismatch { cross_section, .. } => assert_eq!(cross_section, vec![4, 1, 2]),
            other => panic!("unexpected error: {other}"),
        }
    }
}
