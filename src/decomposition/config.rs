//! Decomposition configuration.

use ndarray::{Array, Dimension};

/// How the time axis is collapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeAggregation {
    /// Sum over all time steps.
    #[default]
    Sum,
    /// Average over the record: sum divided by the number of time steps
    /// (masked steps included). Gives a tide-averaged transport rate.
    Mean,
}

impl TimeAggregation {
    /// Turn a time sum into the configured aggregate.
    pub fn apply<D: Dimension>(self, sum: Array<f64, D>, n_times: usize) -> Array<f64, D> {
        match self {
            TimeAggregation::Sum => sum,
            TimeAggregation::Mean => sum / n_times as f64,
        }
    }
}

/// Weights used for the depth and time averages that split each field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Weighting {
    /// Plain arithmetic means over valid samples.
    #[default]
    Uniform,
    /// Means weighted by cross-sectional area. When the area does not vary
    /// over the record, off-diagonal cross-products integrate to zero and the
    /// residual term holds only the tide- and depth-varying product.
    Area,
}

/// Configuration for [`Decomposer`](super::Decomposer).
///
/// # Example
///
/// ```
/// use sfd_rs::{DecompositionConfig, TimeAggregation, Weighting};
///
/// let config = DecompositionConfig::new()
///     .with_time_aggregation(TimeAggregation::Mean)
///     .with_weighting(Weighting::Area);
/// assert_eq!(config, DecompositionConfig::tide_averaged());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecompositionConfig {
    /// Time aggregation of every component.
    pub time_aggregation: TimeAggregation,
    /// Weighting of the averages that split flow and salinity.
    pub weighting: Weighting,
}

impl DecompositionConfig {
    /// Summed over time, arithmetic means.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tide-averaged transport with area-weighted means.
    pub fn tide_averaged() -> Self {
        Self {
            time_aggregation: TimeAggregation::Mean,
            weighting: Weighting::Area,
        }
    }

    /// Set the time aggregation.
    pub fn with_time_aggregation(mut self, time_aggregation: TimeAggregation) -> Self {
        self.time_aggregation = time_aggregation;
        self
    }

    /// Set the weighting.
    pub fn with_weighting(mut self, weighting: Weighting) -> Self {
        self.weighting = weighting;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_defaults() {
        let config = DecompositionConfig::default();
        assert_eq!(config.time_aggregation, TimeAggregation::Sum);
        assert_eq!(config.weighting, Weighting::Uniform);
    }

    #[test]
    fn test_aggregation() {
        let sum = array![8.0, 4.0];
        assert_eq!(TimeAggregation::Sum.apply(sum.clone(), 4), array![8.0, 4.0]);
        assert_eq!(TimeAggregation::Mean.apply(sum, 4), array![2.0, 1.0]);
    }
}
