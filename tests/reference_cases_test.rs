//! Reference cases on a 10×10×10 record with unit area.
//!
//! Fluxes are tide-averaged, so a depth-uniform flow of 1 carrying salinity
//! 30 across 10 unit cells gives 300.

use ndarray::{Array3, s};
use sfd_rs::{
    Decomposer, DecompositionConfig, FluxComponent, PositionIndex, SectionFields, Weighting,
};

const N: usize = 10;

fn uniform() -> (Array3<f64>, Array3<f64>, Array3<f64>) {
    (
        Array3::ones((N, N, N)),
        Array3::from_elem((N, N, N), 30.0),
        Array3::ones((N, N, N)),
    )
}

fn assert_row(fluxes: &sfd_rs::FluxDecomposition, component: FluxComponent, expected: f64) {
    for (x, &v) in fluxes.component(component).iter().enumerate() {
        assert_eq!(v, expected, "{component} at x{x}");
    }
}

#[test]
fn test_uniform_field() {
    let (u, s, a) = uniform();
    let fluxes = Decomposer::from_arrays(u, s, a)
        .unwrap()
        .with_config(DecompositionConfig::tide_averaged())
        .fluxes();

    assert_eq!(fluxes.shape(), (4, N));
    assert_row(&fluxes, FluxComponent::NetFlow, 300.0);
    assert_row(&fluxes, FluxComponent::TidalPumping, 0.0);
    assert_row(&fluxes, FluxComponent::Circulation, 0.0);
    assert_row(&fluxes, FluxComponent::TidalShear, 0.0);
}

#[test]
fn test_salt_wedge() {
    // Fresh water leaves through the upper half, salt water returns below
    let (mut u, mut s, a) = uniform();
    u.slice_mut(s![.., .., 5..]).mapv_inplace(|v| -v);
    s.slice_mut(s![.., .., 5..]).fill(0.0);

    for weighting in [Weighting::Uniform, Weighting::Area] {
        let config = DecompositionConfig::tide_averaged().with_weighting(weighting);
        let fluxes = Decomposer::from_arrays(u.clone(), s.clone(), a.clone())
            .unwrap()
            .with_config(config)
            .fluxes();

        for x in PositionIndex::iter(N) {
            assert_eq!(fluxes.at(x), [0.0, 0.0, 150.0, 0.0], "{weighting:?} at {x}");
        }
    }
}

#[test]
fn test_masked_block() {
    // Lower half of the seaward positions is below the bed
    let (u, s, a) = uniform();
    let mut mask = Array3::from_elem((N, N, N), true);
    mask.slice_mut(s![.., 5.., 5..]).fill(false);

    let fields = SectionFields::builder(u, s, a).with_mask(mask).build().unwrap();
    assert_eq!(fields.n_valid(), 750);

    let fluxes = Decomposer::new(fields)
        .with_config(DecompositionConfig::tide_averaged())
        .fluxes();

    let net = fluxes.component(FluxComponent::NetFlow);
    for x in 0..N {
        let expected = if x < 5 { 300.0 } else { 150.0 };
        assert_eq!(net[x], expected, "net flow at x{x}");
    }
    assert_row(&fluxes, FluxComponent::TidalPumping, 0.0);
    assert_row(&fluxes, FluxComponent::Circulation, 0.0);
    assert_row(&fluxes, FluxComponent::TidalShear, 0.0);
}

#[test]
fn test_masked_samples_are_never_read() {
    let (u, mut s, a) = uniform();
    let mut mask = Array3::from_elem((N, N, N), true);
    mask.slice_mut(s![.., 5.., 5..]).fill(false);
    s.slice_mut(s![.., 5.., 5..]).fill(f64::NAN);

    let fluxes = Decomposer::new(SectionFields::builder(u, s, a).with_mask(mask).build().unwrap())
        .with_config(DecompositionConfig::tide_averaged())
        .fluxes();
    assert!(fluxes.as_array().iter().all(|v| v.is_finite()));
    assert_eq!(fluxes.component(FluxComponent::NetFlow)[9], 150.0);
}
