//! Flux components and the decomposition result.

use crate::types::PositionIndex;
use ndarray::{Array1, Array2, ArrayBase, ArrayView1, ArrayView2, Axis, Data, Ix1};
use std::fmt;

/// One of the four salt flux components, in canonical row order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FluxComponent {
    /// A: tide-averaged, depth-averaged transport by the net (river) flow.
    NetFlow,
    /// B: tide-varying, depth-averaged transport (tidal pumping).
    TidalPumping,
    /// C: tide-averaged, depth-varying transport (estuarine circulation).
    Circulation,
    /// D: tide- and depth-varying transport plus all cross terms.
    TidalShear,
}

impl FluxComponent {
    /// All components in row order.
    pub const ALL: [FluxComponent; 4] = [
        FluxComponent::NetFlow,
        FluxComponent::TidalPumping,
        FluxComponent::Circulation,
        FluxComponent::TidalShear,
    ];

    /// Row index in a [`FluxDecomposition`].
    #[inline]
    pub fn index(self) -> usize {
        match self {
            FluxComponent::NetFlow => 0,
            FluxComponent::TidalPumping => 1,
            FluxComponent::Circulation => 2,
            FluxComponent::TidalShear => 3,
        }
    }

    /// Short label (A-D).
    pub fn label(self) -> &'static str {
        match self {
            FluxComponent::NetFlow => "A",
            FluxComponent::TidalPumping => "B",
            FluxComponent::Circulation => "C",
            FluxComponent::TidalShear => "D",
        }
    }

    /// Descriptive name.
    pub fn name(self) -> &'static str {
        match self {
            FluxComponent::NetFlow => "net flow",
            FluxComponent::TidalPumping => "tidal pumping",
            FluxComponent::Circulation => "estuarine circulation",
            FluxComponent::TidalShear => "time-dependent shear",
        }
    }
}

impl fmt::Display for FluxComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.name())
    }
}

/// Salt flux per component and along-channel position, shape `(4, X)`.
///
/// Rows follow [`FluxComponent::ALL`]; columns keep the input position
/// order.
#[derive(Clone, Debug, PartialEq)]
pub struct FluxDecomposition {
    rows: Array2<f64>,
}

impl FluxDecomposition {
    pub(crate) fn new(rows: Array2<f64>) -> Self {
        debug_assert_eq!(rows.nrows(), FluxComponent::ALL.len());
        Self { rows }
    }

    /// `(4, X)`.
    pub fn shape(&self) -> (usize, usize) {
        self.rows.dim()
    }

    /// Number of along-channel positions.
    pub fn n_positions(&self) -> usize {
        self.rows.ncols()
    }

    /// One component across all positions.
    pub fn component(&self, component: FluxComponent) -> ArrayView1<'_, f64> {
        self.rows.row(component.index())
    }

    /// All four components at one position, in row order.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of range.
    pub fn at(&self, position: PositionIndex) -> [f64; 4] {
        let column = self.rows.column(position.get());
        [column[0], column[1], column[2], column[3]]
    }

    /// Sum of the components at every position (A + B + C + D, in that
    /// order).
    pub fn total(&self) -> Array1<f64> {
        self.rows
            .columns()
            .into_iter()
            .map(|c| c.iter().fold(0.0, |acc, &v| acc + v))
            .collect()
    }

    /// Iterate over `(component, row)` pairs in row order.
    pub fn iter(&self) -> impl Iterator<Item = (FluxComponent, ArrayView1<'_, f64>)> {
        FluxComponent::ALL
            .into_iter()
            .zip(self.rows.axis_iter(Axis(0)))
    }

    /// Borrow the `(4, X)` array.
    pub fn as_array(&self) -> ArrayView2<'_, f64> {
        self.rows.view()
    }

    /// Take the `(4, X)` array.
    pub fn into_array(self) -> Array2<f64> {
        self.rows
    }

    /// Largest relative difference between [`total`](Self::total) and a
    /// directly aggregated flux.
    ///
    /// At each position the difference is scaled by the largest magnitude
    /// among the direct value and the four components. NaN anywhere yields
    /// NaN.
    ///
    /// # Panics
    ///
    /// Panics if `direct` does not have one entry per position.
    pub fn closure_error<S: Data<Elem = f64>>(&self, direct: &ArrayBase<S, Ix1>) -> f64 {
        assert_eq!(direct.len(), self.n_positions(), "one direct value per position");

        let mut worst = 0.0_f64;
        for (column, &reference) in self.rows.columns().into_iter().zip(direct.iter()) {
            let total = column.iter().fold(0.0, |acc, &v| acc + v);
            let scale = column
                .iter()
                .fold(reference.abs(), |acc, &v| acc.max(v.abs()))
                .max(f64::MIN_POSITIVE);
            let error = (total - reference).abs() / scale;
            if error.is_nan() {
                return f64::NAN;
            }
            worst = worst.max(error);
        }
        worst
    }
}
