//! Decomposition of cross-sectional salt flux into four components.
//!
//! # Mathematical Background
//!
//! Each field φ(t, x, z) (flow u, salinity s) is split into a tide-averaged
//! depth average, its tide-varying deviation, the tide-averaged depth
//! deviation and the remainder:
//! ```text
//! φ = φ₀(x) + φ₁(t, x) + φ₂(x, z) + φ₃(t, x, z)
//! ```
//!
//! With 𝒯 the time aggregation (sum or mean over T) and A the
//! cross-sectional area, the salt flux at each position x is
//! ```text
//! A-component  = u₀ s₀ 𝒯(Σ_z A)                  net flow
//! B-component  = 𝒯(u₁ s₁ Σ_z A)                  tidal pumping
//! C-component  = Σ_z u₂ s₂ 𝒯(A)                  estuarine circulation
//! D-component  = 𝒯(Σ_z [u₃ s₃ + Σ_{i≠j} uᵢ sⱼ] A)  time-dependent shear
//! ```
//!
//! so that A + B + C + D = 𝒯(Σ_z u s A) up to rounding.
//!
//! # Example
//!
//! ```
//! use ndarray::Array3;
//! use sfd_rs::{Decomposer, DecompositionConfig, FluxComponent};
//!
//! // Two-layer exchange flow: fresh water out on top, salt water in below
//! let flow = Array3::from_shape_fn((12, 3, 4), |(_, _, z)| if z < 2 { 1.0 } else { -1.0 });
//! let salinity = Array3::from_shape_fn((12, 3, 4), |(_, _, z)| if z < 2 { 0.0 } else { 30.0 });
//! let area = Array3::<f64>::ones((12, 3, 4));
//!
//! let decomposer = Decomposer::from_arrays(flow, salinity, area)?
//!     .with_config(DecompositionConfig::tide_averaged());
//! let fluxes = decomposer.fluxes();
//!
//! for (component, row) in fluxes.iter() {
//!     println!("{component}: {row}");
//! }
//! assert!(fluxes.component(FluxComponent::Circulation)[0] < 0.0);
//! # Ok::<(), sfd_rs::SfdError>(())
//! ```

mod component;
mod config;
mod decomposer;
mod parts;

pub use component::{FluxComponent, FluxDecomposition};
pub use config::{DecompositionConfig, TimeAggregation, Weighting};
pub use decomposer::Decomposer;
pub use parts::FieldParts;

use ndarray::Axis;

/// Canonical axes of a `(T, X, Z)` record.
pub(crate) const TIME: Axis = Axis(0);
pub(crate) const DEPTH: Axis = Axis(2);
