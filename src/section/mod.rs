//! Validated cross-section records.
//!
//! A [`SectionFields`] owns the three co-registered input fields (flow,
//! salinity, cross-sectional area), an optional validity mask and the cached
//! record shape. Once built, the equal-shape invariant holds by construction
//! and every array is stored in canonical `(time, position, depth)` order.
//!
//! # Example
//!
//! ```
//! use ndarray::Array3;
//! use sfd_rs::{AxisLayout, SectionFields};
//!
//! // Arrays stored as (position, time, depth)
//! let flow = Array3::<f64>::ones((4, 12, 3));
//! let salinity = Array3::from_elem((4, 12, 3), 30.0);
//! let area = Array3::from_elem((4, 12, 3), 2.5);
//!
//! let fields = SectionFields::builder(flow, salinity, area)
//!     .with_layout(AxisLayout::new(1, 2))
//!     .build()?;
//!
//! assert_eq!(fields.shape().n_times(), 12);
//! assert_eq!(fields.shape().n_positions(), 4);
//! # Ok::<(), sfd_rs::SfdError>(())
//! ```

mod builder;

pub use builder::SectionFieldsBuilder;

use crate::error::{InvalidInput, Result};
use crate::types::{AxisLayout, FieldKind, SampleIndex, SectionShape};
use ndarray::{Array3, ArrayD, ArrayView3, Axis, Ix3, Slice, Zip};
use std::ops::Range;

/// The validated triple (flow, salinity, cross_section) of a cross-section
/// record.
///
/// All arrays share the shape `(T, X, Z)`; no axis is empty.
#[derive(Clone, Debug)]
pub struct SectionFields {
    flow: Array3<f64>,
    salinity: Array3<f64>,
    cross_section: Array3<f64>,
    /// `true` = valid sample
    mask: Option<Array3<bool>>,
    shape: SectionShape,
    layout: AxisLayout,
}

impl SectionFields {
    /// Validate three `(T, X, Z)` arrays with default settings.
    ///
    /// Rejects differing shapes, empty axes and non-finite samples.
    pub fn new(
        flow: Array3<f64>,
        salinity: Array3<f64>,
        cross_section: Array3<f64>,
    ) -> Result<Self> {
        Self::builder(flow, salinity, cross_section).build()
    }

    /// Start a builder for custom layout, mask or validation policy.
    pub fn builder(
        flow: Array3<f64>,
        salinity: Array3<f64>,
        cross_section: Array3<f64>,
    ) -> SectionFieldsBuilder {
        SectionFieldsBuilder::new(flow, salinity, cross_section)
    }

    /// Validate dynamically-dimensioned arrays (e.g. straight from a file
    /// reader). Each array must be three-dimensional.
    pub fn from_dyn(
        flow: ArrayD<f64>,
        salinity: ArrayD<f64>,
        cross_section: ArrayD<f64>,
    ) -> Result<Self> {
        let flow = into_ix3(flow, FieldKind::Flow)?;
        let salinity = into_ix3(salinity, FieldKind::Salinity)?;
        let cross_section = into_ix3(cross_section, FieldKind::CrossSection)?;
        Self::new(flow, salinity, cross_section)
    }

    pub(crate) fn from_parts(
        flow: Array3<f64>,
        salinity: Array3<f64>,
        cross_section: Array3<f64>,
        mask: Option<Array3<bool>>,
        layout: AxisLayout,
    ) -> Self {
        let (n_times, n_positions, n_levels) = flow.dim();
        Self {
            shape: SectionShape::new(n_times, n_positions, n_levels),
            flow,
            salinity,
            cross_section,
            mask,
            layout,
        }
    }

    /// Record dimensions `(T, X, Z)`.
    #[inline]
    pub fn shape(&self) -> SectionShape {
        self.shape
    }

    /// Axis layout the caller supplied the arrays in.
    #[inline]
    pub fn layout(&self) -> AxisLayout {
        self.layout
    }

    /// Flow velocity in canonical `(T, X, Z)` order.
    pub fn flow(&self) -> ArrayView3<'_, f64> {
        self.flow.view()
    }

    /// Salinity in canonical `(T, X, Z)` order.
    pub fn salinity(&self) -> ArrayView3<'_, f64> {
        self.salinity.view()
    }

    /// Cross-sectional area in canonical `(T, X, Z)` order.
    pub fn cross_section(&self) -> ArrayView3<'_, f64> {
        self.cross_section.view()
    }

    /// Field by kind.
    pub fn field(&self, kind: FieldKind) -> ArrayView3<'_, f64> {
        match kind {
            FieldKind::Flow => self.flow(),
            FieldKind::Salinity => self.salinity(),
            FieldKind::CrossSection => self.cross_section(),
        }
    }

    /// Validity mask (`true` = valid), if one was supplied.
    pub fn mask(&self) -> Option<ArrayView3<'_, bool>> {
        self.mask.as_ref().map(|m| m.view())
    }

    /// Whether the sample at `index` takes part in the decomposition.
    pub fn is_valid(&self, index: SampleIndex) -> bool {
        self.mask
            .as_ref()
            .is_none_or(|m| m[index.as_array()])
    }

    /// Number of valid samples.
    pub fn n_valid(&self) -> usize {
        match &self.mask {
            Some(m) => m.iter().filter(|&&v| v).count(),
            None => self.shape.n_samples(),
        }
    }

    /// Borrowed view of the whole record.
    pub(crate) fn view(&self) -> SectionView<'_> {
        SectionView {
            flow: self.flow.view(),
            salinity: self.salinity.view(),
            cross_section: self.cross_section.view(),
            mask: self.mask.as_ref().map(|m| m.view()),
        }
    }
}

fn into_ix3(array: ArrayD<f64>, field: FieldKind) -> Result<Array3<f64>> {
    let ndim = array.ndim();
    array
        .into_dimensionality::<Ix3>()
        .map_err(|_| InvalidInput::Rank { field, ndim }.into())
}

/// Borrowed `(T, X, Z)` views of a record, or of a slab of positions.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SectionView<'a> {
    pub flow: ArrayView3<'a, f64>,
    pub salinity: ArrayView3<'a, f64>,
    pub cross_section: ArrayView3<'a, f64>,
    pub mask: Option<ArrayView3<'a, bool>>,
}

impl<'a> SectionView<'a> {
    pub fn n_times(&self) -> usize {
        self.flow.len_of(Axis(0))
    }

    pub fn n_positions(&self) -> usize {
        self.flow.len_of(Axis(1))
    }

    /// Restrict to a contiguous range of along-channel positions.
    pub fn slab(&self, positions: Range<usize>) -> SectionView<'a> {
        let slice = Slice::from(positions);
        let slab = |a: ArrayView3<'a, f64>| a.slice_axis_move(Axis(1), slice);
        SectionView {
            flow: slab(self.flow),
            salinity: slab(self.salinity),
            cross_section: slab(self.cross_section),
            mask: self.mask.map(|m| m.slice_axis_move(Axis(1), slice)),
        }
    }

    /// Field values with masked samples replaced by zero.
    pub fn masked_values(&self, kind: FieldKind) -> Array3<f64> {
        let values = match kind {
            FieldKind::Flow => self.flow,
            FieldKind::Salinity => self.salinity,
            FieldKind::CrossSection => self.cross_section,
        };
        match self.mask {
            Some(mask) => Zip::from(&values)
                .and(&mask)
                .map_collect(|&v, &valid| if valid { v } else { 0.0 }),
            None => values.to_owned(),
        }
    }

    /// `1.0` for valid samples, `0.0` for masked ones.
    pub fn validity(&self) -> Array3<f64> {
        match self.mask {
            Some(mask) => mask.mapv(|valid| if valid { 1.0 } else { 0.0 }),
            None => Array3::ones(self.flow.raw_dim()),
        }
    }
}
