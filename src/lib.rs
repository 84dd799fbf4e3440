//! # sfd-rs
//!
//! Salt flux decomposition for three-dimensional estuarine cross-section
//! data.
//!
//! Given flow velocity, salinity and cross-sectional area sampled on a
//! `(time, along-channel position, depth)` grid, this crate splits the
//! tidally integrated salt flux through each cross-section into four
//! additive components:
//! - A: net flow (river discharge carrying the mean salinity)
//! - B: tidal pumping (tide-varying, depth-averaged correlation)
//! - C: estuarine circulation (steady vertical exchange flow)
//! - D: time-dependent shear (tide- and depth-varying correlation plus
//!   all cross terms)
//!
//! The building blocks:
//! - Strongly-typed indices and shapes ([`types`])
//! - Validated input records with optional masks and axis layouts ([`section`])
//! - Deterministic axis reductions ([`reduce`])
//! - The decomposition itself ([`decomposition`])
//!
//! # Example
//!
//! ```
//! use ndarray::Array3;
//! use sfd_rs::{Decomposer, FluxComponent};
//!
//! let (t, x, z) = (24, 5, 8);
//! let flow = Array3::from_shape_fn((t, x, z), |(t, _, _)| {
//!     0.05 + (2.0 * std::f64::consts::PI * t as f64 / 12.0).sin()
//! });
//! let salinity = Array3::from_shape_fn((t, x, z), |(_, x, z)| 30.0 - 3.0 * x as f64 + z as f64);
//! let area = Array3::from_elem((t, x, z), 12.5);
//!
//! let fluxes = Decomposer::from_arrays(flow, salinity, area)?.fluxes();
//! assert_eq!(fluxes.shape(), (4, 5));
//! println!("net flow flux: {}", fluxes.component(FluxComponent::NetFlow));
//! # Ok::<(), sfd_rs::SfdError>(())
//! ```
//!
//! # Features
//!
//! - `parallel`: `Decomposer::fluxes_parallel` on the rayon thread pool

pub mod decomposition;
pub mod error;
pub mod reduce;
pub mod section;
pub mod types;

// Re-export main types for convenience
pub use decomposition::{
    Decomposer, DecompositionConfig, FieldParts, FluxComponent, FluxDecomposition,
    TimeAggregation, Weighting,
};
pub use error::{InvalidInput, Result, SfdError};
pub use section::{SectionFields, SectionFieldsBuilder};
pub use types::{
    AxisLayout, FieldKind, LevelIndex, PositionIndex, SampleIndex, SectionShape, TimeIndex,
};
