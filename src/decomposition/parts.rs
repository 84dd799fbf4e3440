//! Four-part split of a single field.

use crate::reduce::{axis_sum, weighted_axis_deviation, weighted_axis_mean};
use ndarray::{Array1, Array2, Array3, ArrayBase, Axis, Data, Ix3};

use super::{DEPTH, TIME};

/// A `(T, X, Z)` field split into tide-averaged / tide-varying and
/// depth-averaged / depth-varying parts.
///
/// ```text
/// φ(t, x, z) = mean(x) + tidal(t, x) + vertical(x, z) + tidal_vertical(t, x, z)
/// ```
///
/// With uniform weights these are the depth mean of the temporal mean, the
/// depth mean of the temporal fluctuation, the depth deviation of the
/// temporal mean and the depth deviation of the temporal fluctuation.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldParts {
    /// Tide-averaged, depth-averaged value, shape `(X,)`.
    pub mean: Array1<f64>,
    /// Tide-varying depth average, shape `(T, X)`.
    pub tidal: Array2<f64>,
    /// Tide-averaged depth deviation, shape `(X, Z)`.
    pub vertical: Array2<f64>,
    /// Tide- and depth-varying remainder, shape `(T, X, Z)`.
    pub tidal_vertical: Array3<f64>,
}

impl FieldParts {
    /// Split `values` using `weights` for every average.
    ///
    /// Depth averages at each time step are weighted by `weights`; the time
    /// average of those depth averages is weighted by the total weight of
    /// each time step. Averages with zero total weight are zero.
    ///
    /// # Panics
    ///
    /// Panics if `values` and `weights` differ in shape.
    pub fn split<S, W>(values: &ArrayBase<S, Ix3>, weights: &ArrayBase<W, Ix3>) -> Self
    where
        S: Data<Elem = f64>,
        W: Data<Elem = f64>,
    {
        let depth_mean = weighted_axis_mean(values, weights, DEPTH);
        let depth_weight = axis_sum(weights, DEPTH);
        let mean = weighted_axis_mean(&depth_mean, &depth_weight, TIME);
        let tidal = weighted_axis_deviation(&depth_mean, &depth_weight, TIME);

        let depth_deviation = weighted_axis_deviation(values, weights, DEPTH);
        let vertical = weighted_axis_mean(&depth_deviation, weights, TIME);
        let tidal_vertical = weighted_axis_deviation(&depth_deviation, weights, TIME);

        Self {
            mean,
            tidal,
            vertical,
            tidal_vertical,
        }
    }

    /// `(T, X, Z)` of the field that was split.
    pub fn shape(&self) -> (usize, usize, usize) {
        self.tidal_vertical.dim()
    }

    /// Sum the four parts back into a `(T, X, Z)` field.
    pub fn reconstruct(&self) -> Array3<f64> {
        let mut field = self.tidal_vertical.clone();
        field += &self.vertical;
        field += &self.tidal.view().insert_axis(DEPTH);
        // (X,) -> (X, 1), broadcast over time and depth
        field += &self.mean.view().insert_axis(Axis(1));
        field
    }
}
