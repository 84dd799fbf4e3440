//! Axis reductions with a fixed summation order.
//!
//! Every reduction folds each lane along the reduced axis in ascending index
//! order, starting from `0.0`. The result for a given lane therefore depends
//! only on the lane's values, never on the memory layout of the array or on
//! how the array was sliced. This is what makes serial and parallel
//! decompositions bit-identical.
//!
//! # Mathematical Background
//!
//! ```text
//! mean(φ)            = φ_ref + Σ (φ - φ_ref) / n
//! weighted_mean(φ,w) = φ_ref + Σ w (φ - φ_ref) / Σ w
//! deviation(φ)       = φ - mean(φ)
//! ```
//!
//! `φ_ref` is the first sample of the lane (the first with non-zero weight
//! for weighted means). The shift leaves the mean unchanged algebraically,
//! but a lane of identical values has a bit-exact mean, so its deviation is
//! exactly zero.
//!
//! Weighted means over a lane whose total weight is zero are `0`.
//!
//! # Example
//!
//! ```
//! use ndarray::{Axis, array};
//! use sfd_rs::reduce::{axis_mean, axis_deviation};
//!
//! let a = array![[1.0, 2.0, 3.0], [3.0, 4.0, 5.0]];
//! let mean = axis_mean(&a, Axis(1));
//! assert_eq!(mean, array![2.0, 4.0]);
//!
//! let dev = axis_deviation(&a, Axis(1));
//! assert_eq!(dev, array![[-1.0, 0.0, 1.0], [-1.0, 0.0, 1.0]]);
//! ```

use ndarray::{Array, ArrayBase, ArrayView1, Axis, Data, RemoveAxis, Zip};

/// Sum of a lane in ascending index order.
#[inline]
pub fn lane_sum(lane: ArrayView1<'_, f64>) -> f64 {
    lane.iter().fold(0.0, |acc, &v| acc + v)
}

/// Arithmetic mean of a lane, shifted by its first sample.
///
/// Returns NaN for an empty lane.
pub fn lane_mean(lane: ArrayView1<'_, f64>) -> f64 {
    let Some(&reference) = lane.get(0) else {
        return f64::NAN;
    };
    let shifted = lane.iter().fold(0.0, |acc, &v| acc + (v - reference));
    reference + shifted / lane.len() as f64
}

/// Weighted mean of a lane, shifted by its first non-zero-weight sample.
///
/// Returns `0.0` when the total weight is zero.
pub fn weighted_lane_mean(values: ArrayView1<'_, f64>, weights: ArrayView1<'_, f64>) -> f64 {
    let reference = values
        .iter()
        .zip(weights.iter())
        .find(|&(_, &w)| w != 0.0)
        .map(|(&v, _)| v);
    let Some(reference) = reference else {
        return 0.0;
    };

    let (shifted, total_weight) = values
        .iter()
        .zip(weights.iter())
        .fold((0.0, 0.0), |(num, den), (&v, &w)| (num + w * (v - reference), den + w));

    if total_weight == 0.0 {
        // Positive and negative weights cancelled out
        return 0.0;
    }
    reference + shifted / total_weight
}

/// Sum along `axis`.
pub fn axis_sum<S, D>(a: &ArrayBase<S, D>, axis: Axis) -> Array<f64, D::Smaller>
where
    S: Data<Elem = f64>,
    D: RemoveAxis,
{
    Zip::from(a.lanes(axis)).map_collect(lane_sum)
}

/// Arithmetic mean along `axis`.
pub fn axis_mean<S, D>(a: &ArrayBase<S, D>, axis: Axis) -> Array<f64, D::Smaller>
where
    S: Data<Elem = f64>,
    D: RemoveAxis,
{
    Zip::from(a.lanes(axis)).map_collect(lane_mean)
}

/// Deviation from the arithmetic mean along `axis`, same shape as `a`.
pub fn axis_deviation<S, D>(a: &ArrayBase<S, D>, axis: Axis) -> Array<f64, D>
where
    S: Data<Elem = f64>,
    D: RemoveAxis,
{
    let mean = axis_mean(a, axis);
    let mut deviation = a.to_owned();
    Zip::from(deviation.lanes_mut(axis))
        .and(&mean)
        .for_each(|mut lane, &m| lane.mapv_inplace(|v| v - m));
    deviation
}

/// Weighted mean along `axis`.
///
/// # Panics
///
/// Panics if `values` and `weights` differ in shape.
pub fn weighted_axis_mean<S, T, D>(
    values: &ArrayBase<S, D>,
    weights: &ArrayBase<T, D>,
    axis: Axis,
) -> Array<f64, D::Smaller>
where
    S: Data<Elem = f64>,
    T: Data<Elem = f64>,
    D: RemoveAxis,
{
    assert_eq!(
        values.shape(),
        weights.shape(),
        "values and weights must have the same shape"
    );
    Zip::from(values.lanes(axis))
        .and(weights.lanes(axis))
        .map_collect(weighted_lane_mean)
}

/// Deviation from the weighted mean along `axis`, same shape as `values`.
///
/// # Panics
///
/// Panics if `values` and `weights` differ in shape.
pub fn weighted_axis_deviation<S, T, D>(
    values: &ArrayBase<S, D>,
    weights: &ArrayBase<T, D>,
    axis: Axis,
) -> Array<f64, D>
where
    S: Data<Elem = f64>,
    T: Data<Elem = f64>,
    D: RemoveAxis,
{
    let mean = weighted_axis_mean(values, weights, axis);
    let mut deviation = values.to_owned();
    Zip::from(deviation.lanes_mut(axis))
        .and(&mean)
        .for_each(|mut lane, &m| lane.mapv_inplace(|v| v - m));
    deviation
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array3, array};

    const TOL: f64 = 1e-12;

    #[test]
    fn test_axis_sum_order_independent_of_layout() {
        let a = Array3::from_shape_fn((5, 3, 4), |(t, x, z)| {
            0.1 * t as f64 + 1.0 / (1.0 + x as f64) + (z as f64).sqrt()
        });
        let transposed = a.clone().reversed_axes();
        let standard = transposed.as_standard_layout().to_owned();

        // Sum over time (axis 0 of `a`, axis 2 of the transposed copies)
        let s1 = axis_sum(&a, Axis(0));
        let s2 = axis_sum(&transposed, Axis(2)).reversed_axes();
        let s3 = axis_sum(&standard, Axis(2)).reversed_axes();
        assert_eq!(s1, s2);
        assert_eq!(s1, s3);
    }

    #[test]
    fn test_mean_plus_deviation_reconstructs() {
        let a = Array3::from_shape_fn((4, 2, 3), |(t, x, z)| {
            (t as f64 * 0.7).sin() + x as f64 - 0.3 * z as f64
        });
        for axis in 0..3 {
            let mean = axis_mean(&a, Axis(axis));
            let dev = axis_deviation(&a, Axis(axis));
            let rebuilt = &dev + &mean.insert_axis(Axis(axis));
            for (r, v) in rebuilt.iter().zip(a.iter()) {
                assert!((r - v).abs() < TOL);
            }
        }
    }

    #[test]
    fn test_constant_lane_has_exact_zero_deviation() {
        let a = Array3::from_elem((3, 2, 7), 0.1);
        assert!(axis_deviation(&a, Axis(2)).iter().all(|&v| v == 0.0));
        assert!(axis_mean(&a, Axis(0)).iter().all(|&v| v == 0.1));
    }

    #[test]
    fn test_weighted_mean() {
        let values = array![[1.0, 3.0], [2.0, 2.0]];
        let weights = array![[3.0, 1.0], [0.0, 5.0]];
        let mean = weighted_axis_mean(&values, &weights, Axis(1));
        assert!((mean[0] - 1.5).abs() < TOL);
        assert!((mean[1] - 2.0).abs() < TOL);
    }

    #[test]
    fn test_weighted_mean_ignores_zero_weight_reference() {
        // First sample has zero weight and must not be the shift reference
        let values = array![100.0, 4.0, 4.0];
        let weights = array![0.0, 2.0, 3.0];
        assert_eq!(weighted_lane_mean(values.view(), weights.view()), 4.0);
    }

    #[test]
    fn test_zero_total_weight_is_zero() {
        let values = array![[5.0, 6.0]];
        let weights = array![[0.0, 0.0]];
        assert_eq!(weighted_axis_mean(&values, &weights, Axis(1)), array![0.0]);
    }

    #[test]
    fn test_weighted_deviation_has_zero_weighted_sum() {
        let values = array![[1.0, 2.0, 4.0], [0.5, -1.0, 3.0]];
        let weights = array![[1.0, 2.0, 0.5], [2.0, 2.0, 1.0]];
        let dev = weighted_axis_deviation(&values, &weights, Axis(1));
        for (d, w) in dev.outer_iter().zip(weights.outer_iter()) {
            let weighted: f64 = d.iter().zip(w.iter()).map(|(a, b)| a * b).sum();
            assert!(weighted.abs() < TOL);
        }
    }

    #[test]
    fn test_nan_propagates() {
        let values = array![[1.0, f64::NAN], [1.0, 2.0]];
        let mean = axis_mean(&values, Axis(1));
        assert!(mean[0].is_nan());
        assert_eq!(mean[1], 1.5);
    }

    #[test]
    fn test_empty_lane_mean_is_nan() {
        let empty = Array3::<f64>::zeros((2, 0, 3));
        let mean = axis_mean(&empty, Axis(1));
        assert_eq!(mean.dim(), (2, 3));
        assert!(mean.iter().all(|v| v.is_nan()));
    }
}
