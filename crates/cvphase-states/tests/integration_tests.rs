//! Integration tests for cvphase-states
//!
//! Gate sequences on multi-mode states, checked against photon-number
//! statistics and dense reference computations.

use cvphase_core::{Layout, PhaseTensor, Tolerance};
use cvphase_states::{GaussianMap, GaussianState, StateConfig, StateError};
use std::f64::consts::{FRAC_PI_2, PI};

fn config() -> StateConfig {
    StateConfig::new().hbar(2.0)
}

fn dense_mul(a: &[f64], b: &[f64], n: usize) -> Vec<f64> {
    let mut out = vec![0.0; n * n];
    for i in 0..n {
        for k in 0..n {
            for j in 0..n {
                out[i * n + j] += a[i * n + k] * b[k * n + j];
            }
        }
    }
    out
}

fn dense_transpose(a: &[f64], n: usize) -> Vec<f64> {
    (0..n * n).map(|idx| a[(idx % n) * n + idx / n]).collect()
}

/// Dense `2N × 2N` xpxp matrix of a map's symplectic part on modes `0..n`
fn embed(map: &GaussianMap, n: usize) -> Vec<f64> {
    let side = 2 * n;
    let mut full = vec![0.0; side * side];
    for i in 0..side {
        full[i * side + i] = 1.0;
    }
    let local = map.symplectic().to_interleaved().unwrap().unwrap();
    let modes = map.symplectic().out_modes();
    for (ri, &row) in modes.iter().enumerate() {
        for (ci, &col) in modes.iter().enumerate() {
            for a in 0..2 {
                for b in 0..2 {
                    full[(2 * row + a) * side + 2 * col + b] = local[&[2 * ri + a, 2 * ci + b][..]];
                }
            }
        }
    }
    full
}

fn apply_all(maps: &[GaussianMap], state: &GaussianState) -> GaussianState {
    maps.iter()
        .fold(state.clone(), |acc, map| map.apply(&acc).unwrap())
}

#[test]
fn test_gate_sequence_matches_dense_reference() {
    let state = GaussianState::thermal(&[0.2, 1.0, 0.0], &config()).unwrap();
    let gates = [
        GaussianMap::squeezing(2, 0.35, 0.2).unwrap(),
        GaussianMap::beamsplitter([1, 2], 0.6, 0.4).unwrap(),
    ];
    let out = apply_all(&gates, &state);

    let s_full = dense_mul(&embed(&gates[1], 3), &embed(&gates[0], 3), 6);
    let v = state.covariance(Layout::Interleaved).unwrap().to_vec();
    let expected = dense_mul(&dense_mul(&s_full, &v, 6), &dense_transpose(&s_full, 6), 6);

    let got = out.covariance(Layout::Interleaved).unwrap().to_vec();
    for (g, e) in got.iter().zip(&expected) {
        assert!((g - e).abs() < 1e-12);
    }
    assert!(out.is_mixed());
}

#[test]
fn test_photon_number_is_conserved_by_passive_gates() {
    let state = GaussianState::coherent(&[1.0, -2.0, 0.5], &[0.3, 0.0, 1.5], &config()).unwrap();
    let before: f64 = state.number_means().unwrap().iter().sum();
    let gates = [
        GaussianMap::beamsplitter([0, 1], 0.3, 0.1).unwrap(),
        GaussianMap::rotation(2, 1.1).unwrap(),
        GaussianMap::beamsplitter([2, 0], 1.2, -0.7).unwrap(),
    ];
    let after: f64 = apply_all(&gates, &state).number_means().unwrap().iter().sum();
    assert!((before - after).abs() < 1e-10);
}

#[test]
fn test_gate_then_inverse_restores_state() {
    let state = GaussianState::squeezed_vacuum(&[0.2, 0.5], &[0.1, 1.0], &config()).unwrap();
    let gate = GaussianMap::beamsplitter([0, 1], 0.8, 0.3).unwrap();
    let inverse =
        GaussianMap::new(gate.symplectic().transpose().unwrap(), PhaseTensor::zero_like()).unwrap();
    let out = apply_all(&[gate, inverse], &state);
    assert!(out.allclose(&state, &Tolerance::default()));
}

#[test]
fn test_displacement_and_rotation_commute_up_to_rotation() {
    let vacuum = GaussianState::vacuum(2, &config()).unwrap();
    let rotated = apply_all(
        &[
            GaussianMap::displacement(0, 1.0, 0.0).unwrap(),
            GaussianMap::rotation(0, FRAC_PI_2).unwrap(),
        ],
        &vacuum,
    );
    let direct = GaussianMap::displacement(0, 0.0, 1.0)
        .unwrap()
        .apply(&vacuum)
        .unwrap();
    assert!(rotated.allclose(&direct, &Tolerance::default()));
}

#[test]
fn test_two_mode_correlations_after_beamsplitter() {
    // squeezed light on a beamsplitter produces photon-number correlations
    let state = GaussianState::squeezed_vacuum(&[0.5, 0.0], &[0.0, 0.0], &config()).unwrap();
    let out = GaussianMap::beamsplitter([0, 1], PI / 4.0, 0.0)
        .unwrap()
        .apply(&state)
        .unwrap();
    let c = out.number_cov().unwrap();
    assert!(c[&[0, 1][..]] > 0.0);
    assert!((c[&[0, 1][..]] - c[&[1, 0][..]]).abs() < 1e-12);
}

#[test]
fn test_gate_outside_state_is_rejected() {
    let state = GaussianState::vacuum(2, &config()).unwrap();
    let err = GaussianMap::beamsplitter([1, 4], 0.1, 0.0)
        .unwrap()
        .apply(&state)
        .unwrap_err();
    assert!(matches!(err, StateError::ModeOutOfRange { mode: 4, .. }));
}
