//! The salt flux decomposer.

use super::{
    DEPTH, DecompositionConfig, FieldParts, FluxComponent, FluxDecomposition, TIME,
    TimeAggregation, Weighting,
};
use crate::error::Result;
use crate::reduce::axis_sum;
use crate::section::{SectionFields, SectionView};
use crate::types::FieldKind;
use ndarray::{Array1, Array2, Array3, Axis, Zip};

/// Decomposes the salt flux through a cross-section record.
///
/// Holds the validated inputs and a configuration; every query recomputes
/// its result from the inputs.
///
/// # Example
///
/// ```
/// use ndarray::Array3;
/// use sfd_rs::{Decomposer, FluxComponent};
///
/// let flow = Array3::<f64>::ones((2, 1, 2));
/// let salinity = Array3::from_elem((2, 1, 2), 2.0);
/// let area = Array3::<f64>::ones((2, 1, 2));
///
/// let fluxes = Decomposer::from_arrays(flow, salinity, area)?.fluxes();
/// assert_eq!(fluxes.shape(), (4, 1));
/// assert_eq!(fluxes.component(FluxComponent::NetFlow)[0], 8.0);
/// assert_eq!(fluxes.component(FluxComponent::TidalPumping)[0], 0.0);
/// # Ok::<(), sfd_rs::SfdError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Decomposer {
    fields: SectionFields,
    config: DecompositionConfig,
}

impl Decomposer {
    /// Create a decomposer with the default configuration.
    pub fn new(fields: SectionFields) -> Self {
        Self {
            fields,
            config: DecompositionConfig::default(),
        }
    }

    /// Validate three `(T, X, Z)` arrays and create a decomposer.
    pub fn from_arrays(
        flow: Array3<f64>,
        salinity: Array3<f64>,
        cross_section: Array3<f64>,
    ) -> Result<Self> {
        Ok(Self::new(SectionFields::new(flow, salinity, cross_section)?))
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: DecompositionConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &DecompositionConfig {
        &self.config
    }

    /// The validated inputs.
    pub fn fields(&self) -> &SectionFields {
        &self.fields
    }

    /// Decompose the salt flux into its four components, shape `(4, X)`.
    pub fn fluxes(&self) -> FluxDecomposition {
        let fluxes = FluxDecomposition::new(decompose_view(&self.fields.view(), &self.config));
        self.log_closure(&fluxes);
        fluxes
    }

    /// A single component across all positions.
    pub fn flux(&self, component: FluxComponent) -> Array1<f64> {
        self.fluxes().component(component).to_owned()
    }

    /// Salt flux aggregated directly from `flow * salinity * area`, shape
    /// `(X,)`. Equals the sum of the four components up to rounding.
    pub fn total_flux(&self) -> Array1<f64> {
        total_view(&self.fields.view(), self.config.time_aggregation)
    }

    /// Split one input field into its four parts.
    ///
    /// Flow and salinity use the configured weighting; the cross-section is
    /// always split with uniform weights.
    pub fn field_parts(&self, kind: FieldKind) -> FieldParts {
        let view = self.fields.view();
        let weights = match kind {
            FieldKind::CrossSection => view.validity(),
            _ => split_weights(&view, self.config.weighting),
        };
        FieldParts::split(&view.masked_values(kind), &weights)
    }

    /// Same as [`fluxes`](Self::fluxes), computed on the rayon thread pool
    /// in chunks of along-channel positions. Bit-identical to the serial
    /// result.
    #[cfg(feature = "parallel")]
    pub fn fluxes_parallel(&self) -> FluxDecomposition {
        use ndarray::s;
        use rayon::prelude::*;

        let view = self.fields.view();
        let n_positions = view.n_positions();
        let n_tasks = rayon::current_num_threads().max(1) * TASKS_PER_THREAD;
        let chunk = n_positions.div_ceil(n_tasks).max(1);
        let n_chunks = n_positions.div_ceil(chunk);

        let slabs: Vec<(usize, Array2<f64>)> = (0..n_chunks)
            .into_par_iter()
            .map(|c| {
                let start = c * chunk;
                let end = (start + chunk).min(n_positions);
                (start, decompose_view(&view.slab(start..end), &self.config))
            })
            .collect();

        let mut rows = Array2::zeros((FluxComponent::ALL.len(), n_positions));
        for (start, slab) in slabs {
            let end = start + slab.ncols();
            rows.slice_mut(s![.., start..end]).assign(&slab);
        }

        let fluxes = FluxDecomposition::new(rows);
        self.log_closure(&fluxes);
        fluxes
    }

    fn log_closure(&self, fluxes: &FluxDecomposition) {
        if log::log_enabled!(log::Level::Debug) {
            let direct = self.total_flux();
            log::debug!(
                "decomposed salt flux for {} record, closure error {:.3e}",
                self.fields.shape(),
                fluxes.closure_error(&direct)
            );
        }
    }
}

#[cfg(feature = "parallel")]
const TASKS_PER_THREAD: usize = 4;

/// Weights for the averages that split flow and salinity.
fn split_weights(view: &SectionView<'_>, weighting: Weighting) -> Array3<f64> {
    match weighting {
        Weighting::Uniform => view.validity(),
        Weighting::Area => view.masked_values(FieldKind::CrossSection),
    }
}

/// Decompose a record (or slab of positions) into `(4, X)` rows.
fn decompose_view(view: &SectionView<'_>, config: &DecompositionConfig) -> Array2<f64> {
    let area = view.masked_values(FieldKind::CrossSection);
    let weights = split_weights(view, config.weighting);

    if log::log_enabled!(log::Level::Trace) {
        let dry = axis_sum(&weights, DEPTH).iter().filter(|&&w| w == 0.0).count();
        if dry > 0 {
            log::trace!("{dry} (time, position) columns carry no weight");
        }
    }

    let flow = FieldParts::split(&view.masked_values(FieldKind::Flow), &weights);
    let salinity = FieldParts::split(&view.masked_values(FieldKind::Salinity), &weights);
    flux_rows(&flow, &salinity, &area, config.time_aggregation)
}

/// Combine the parts of flow and salinity into the four component rows.
fn flux_rows(
    flow: &FieldParts,
    salinity: &FieldParts,
    area: &Array3<f64>,
    aggregation: TimeAggregation,
) -> Array2<f64> {
    let (n_times, n_positions, _) = area.dim();
    let (u, s) = (flow, salinity);

    // A: depth first, then time
    let depth_area = axis_sum(area, DEPTH);
    let net = &(&u.mean * &s.mean) * &aggregation.apply(axis_sum(&depth_area, TIME), n_times);

    // B: area summed over depth, product aggregated over time
    let tidal_density = &(&u.tidal * &s.tidal) * &depth_area;
    let tidal = aggregation.apply(axis_sum(&tidal_density, TIME), n_times);

    // C: area aggregated over time, product summed over depth
    let tide_area = aggregation.apply(axis_sum(area, TIME), n_times);
    let circulation = axis_sum(&(&(&u.vertical * &s.vertical) * &tide_area), Axis(1));

    // D: depth first, then time
    let residual_density = Zip::indexed(area).map_collect(|(t, x, z), &a| {
        let up = [u.mean[x], u.tidal[[t, x]], u.vertical[[x, z]], u.tidal_vertical[[t, x, z]]];
        let sp = [s.mean[x], s.tidal[[t, x]], s.vertical[[x, z]], s.tidal_vertical[[t, x, z]]];
        residual_product(&up, &sp) * a
    });
    let residual = aggregation.apply(axis_sum(&axis_sum(&residual_density, DEPTH), TIME), n_times);

    let mut rows = Array2::zeros((FluxComponent::ALL.len(), n_positions));
    rows.row_mut(FluxComponent::NetFlow.index()).assign(&net);
    rows.row_mut(FluxComponent::TidalPumping.index()).assign(&tidal);
    rows.row_mut(FluxComponent::Circulation.index()).assign(&circulation);
    rows.row_mut(FluxComponent::TidalShear.index()).assign(&residual);
    rows
}

/// Every product `uᵢ sⱼ` except the three diagonal pairs owned by A, B and C,
/// added in row-major order.
#[inline]
fn residual_product(u: &[f64; 4], s: &[f64; 4]) -> f64 {
    let mut acc = 0.0;
    for (i, ui) in u.iter().enumerate() {
        for (j, sj) in s.iter().enumerate() {
            if i == j && i < 3 {
                continue;
            }
            acc += ui * sj;
        }
    }
    acc
}

/// Direct aggregation of `flow * salinity * area` over valid samples.
fn total_view(view: &SectionView<'_>, aggregation: TimeAggregation) -> Array1<f64> {
    let flow = view.masked_values(FieldKind::Flow);
    let salinity = view.masked_values(FieldKind::Salinity);
    let area = view.masked_values(FieldKind::CrossSection);
    let density = &(&flow * &salinity) * &area;
    aggregation.apply(axis_sum(&axis_sum(&density, DEPTH), TIME), view.n_times())
}
