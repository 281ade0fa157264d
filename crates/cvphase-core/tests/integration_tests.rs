//! Integration tests for cvphase-core
//!
//! End-to-end behaviour of the block algebra: composing few-mode gates with
//! many-mode tensors, layout conversions, and the concrete scenarios the
//! state layer depends on.

use cvphase_array::DenseArray;
use cvphase_core::{Layout, Likeness, ModeSpec, PhaseTensor, Product, TensorError, Tolerance};

fn flat(values: &[f64], rows: usize, cols: usize) -> DenseArray<f64> {
    DenseArray::from_vec(values.to_vec(), &[rows, cols]).unwrap()
}

fn iota_matrix(modes: Vec<usize>, likeness: Likeness) -> PhaseTensor<f64> {
    let side = 2 * modes.len();
    let values: Vec<f64> = (0..side * side).map(|x| 1.0 + x as f64).collect();
    PhaseTensor::from_interleaved(flat(&values, side, side), modes, likeness).unwrap()
}

fn vector(values: &[f64], modes: Vec<usize>) -> PhaseTensor<f64> {
    PhaseTensor::from_interleaved(
        DenseArray::from_vec(values.to_vec(), &[values.len()]).unwrap(),
        modes,
        Likeness::Zero,
    )
    .unwrap()
}

fn tensor(product: Product<f64>) -> PhaseTensor<f64> {
    product.into_tensor().unwrap()
}

#[test]
fn test_layout_round_trip_both_layouts() {
    let values: Vec<f64> = (0..16).map(|x| x as f64).collect();
    for layout in [Layout::Interleaved, Layout::Grouped] {
        let array = flat(&values, 4, 4);
        let t = PhaseTensor::from_layout(array.clone(), layout, vec![2, 0], Likeness::Zero).unwrap();
        assert_eq!(t.to_layout(layout).unwrap().unwrap(), array);
    }
}

#[test]
fn test_layouts_describe_the_same_tensor() {
    // xpxp [[a, b], [c, d]] blocks per mode vs. xxpp grouping
    let xpxp = flat(
        &[
            1.0, 2.0, 3.0, 4.0, //
            5.0, 6.0, 7.0, 8.0, //
            9.0, 10.0, 11.0, 12.0, //
            13.0, 14.0, 15.0, 16.0,
        ],
        4,
        4,
    );
    let t = PhaseTensor::from_interleaved(xpxp, ModeSpec::Inferred, Likeness::Zero).unwrap();
    let xxpp = t.to_grouped().unwrap().unwrap();
    // row order x0 x1 p0 p1 = xpxp rows 0 2 1 3, same for columns
    assert_eq!(
        xxpp.to_vec(),
        vec![
            1.0, 3.0, 2.0, 4.0, //
            9.0, 11.0, 10.0, 12.0, //
            5.0, 7.0, 6.0, 8.0, //
            13.0, 15.0, 14.0, 16.0,
        ]
    );
    let back = PhaseTensor::from_grouped(xxpp, ModeSpec::Inferred, Likeness::Zero).unwrap();
    assert_eq!(back, t);
}

#[test]
fn test_identity_absorption() {
    let m = iota_matrix(vec![0, 1], Likeness::Zero);
    let one = PhaseTensor::one_like();
    assert_eq!(tensor(m.matmul(&one).unwrap()), m);
    assert_eq!(tensor(one.matmul(&m).unwrap()), m);
}

#[test]
fn test_zero_absorption() {
    let m = iota_matrix(vec![3], Likeness::One);
    let zero = PhaseTensor::zero_like();
    assert_eq!(m.add(&zero).unwrap(), m);
    assert_eq!(zero.add(&m).unwrap(), m);
}

#[test]
fn test_transpose_involution() {
    let c = PhaseTensor::from_interleaved(
        flat(&(0..8).map(|x| x as f64).collect::<Vec<_>>(), 2, 4),
        (vec![4], vec![1, 2]),
        Likeness::Zero,
    )
    .unwrap();
    let t = c.transpose().unwrap();
    assert_eq!(t.out_modes(), &[1, 2]);
    assert_eq!(t.in_modes(), &[4]);
    assert_eq!(t.transpose().unwrap(), c);
}

#[test]
fn test_mode_disjoint_contraction_is_zero_like() {
    let a = iota_matrix(vec![0, 1], Likeness::Zero);
    let b = iota_matrix(vec![2, 3], Likeness::Zero);
    let c = tensor(a.matmul(&b).unwrap());
    assert!(!c.is_defined());
    assert!(c.is_zero_like());
    assert!(c.out_modes().is_empty());
    assert!(c.in_modes().is_empty());
}

#[test]
fn test_duplicate_pass_through_modes_conflict() {
    // one-like coherence A: out [1] <- in [0]; B rows [0, 1]
    // contracted [0], B's uncontracted row 1 passes through and collides with A.out
    let a = PhaseTensor::from_interleaved(
        flat(&[1.0, 0.0, 0.0, 1.0], 2, 2),
        (vec![1], vec![0]),
        Likeness::One,
    )
    .unwrap();
    let b = iota_matrix(vec![0, 1], Likeness::Zero);
    match a.matmul(&b) {
        Err(TensorError::ModeConflict { modes, .. }) => assert_eq!(modes, vec![1]),
        other => panic!("expected a mode conflict, got {:?}", other),
    }
}

#[test]
fn test_overlapping_diagonals_without_identity_conflict() {
    // A on [0, 1], B on [1, 2], neither one-like: the only contracted mode is 1,
    // uncontracted modes meet implicit zeros, and out [0, 1] / in [1, 2]
    // overlap partially
    let a = PhaseTensor::identity(&[0, 1], Likeness::Zero).unwrap();
    let b = iota_matrix(vec![1, 2], Likeness::Zero);
    assert!(matches!(
        a.matmul(&b),
        Err(TensorError::ModeConflict { .. })
    ));
}

#[test]
fn test_overlapping_diagonal_against_cross_block() {
    // A identity-valued on [0, 1] (zero-like), B a cross block from mode 2 into mode 1
    let a = PhaseTensor::identity(&[0, 1], Likeness::Zero).unwrap();
    let b = PhaseTensor::from_interleaved(
        flat(&[1.0, 2.0, 3.0, 4.0], 2, 2),
        (vec![1], vec![2]),
        Likeness::Zero,
    )
    .unwrap();
    let c = tensor(a.matmul(&b).unwrap());
    assert_eq!(c.out_modes(), &[0, 1]);
    assert_eq!(c.in_modes(), &[2]);
    assert!(c.is_zero_like());
    let flat_c = c.to_interleaved().unwrap().unwrap();
    // row band of mode 0 is zero, mode 1 carries B
    assert_eq!(flat_c.to_vec(), vec![0.0, 0.0, 0.0, 0.0, 1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn test_overlapping_one_like_diagonals_merge() {
    let a = PhaseTensor::identity(&[0, 1], Likeness::One).unwrap();
    let b = iota_matrix(vec![1, 2], Likeness::One);
    let c = tensor(a.matmul(&b).unwrap());
    assert_eq!(c.out_modes(), &[0, 1, 2]);
    assert_eq!(c.in_modes(), &[0, 1, 2]);
    assert!(c.is_one_like());

    // mode 0 passes through A's identity column, modes 1 and 2 carry B
    let cf = c.to_interleaved().unwrap().unwrap();
    let bf = b.to_interleaved().unwrap().unwrap();
    assert_eq!(cf[&[0, 0][..]], 1.0);
    assert_eq!(cf[&[0, 2][..]], 0.0);
    for r in 0..4 {
        for col in 0..4 {
            assert_eq!(cf[&[2 + r, 2 + col][..]], bf[&[r, col][..]]);
        }
    }
}

#[test]
fn test_vector_union_add() {
    let a = vector(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![0, 1, 2]);
    let b = vector(&[10.0, 20.0, 30.0, 40.0], vec![1, 2]);
    let sum = a.add(&b).unwrap();
    assert_eq!(sum.out_modes(), &[0, 1, 2]);
    assert_eq!(
        sum.to_interleaved().unwrap().unwrap().to_vec(),
        vec![1.0, 2.0, 13.0, 24.0, 35.0, 46.0]
    );
}

#[test]
fn test_replicate_single_mode_identity_three_times() {
    let single = PhaseTensor::<f64>::identity(&[0], Likeness::One).unwrap();
    let triple = single.replicate(3, ModeSpec::Inferred).unwrap();
    assert_eq!(triple.out_modes(), &[0, 1, 2]);
    assert_eq!(triple.in_modes(), &[0, 1, 2]);
    assert!(triple.is_one_like());

    let f = triple.to_interleaved().unwrap().unwrap();
    for r in 0..6 {
        for c in 0..6 {
            let expected = if r == c { 1.0 } else { 0.0 };
            assert_eq!(f[&[r, c][..]], expected);
        }
    }
}

#[test]
fn test_local_gate_on_global_covariance() {
    // rotation by 90 degrees on mode 1 of a 3-mode diagonal covariance
    let values: Vec<f64> = (0..36).map(|x| x as f64).collect();
    let cov = PhaseTensor::from_interleaved(flat(&values, 6, 6), ModeSpec::Inferred, Likeness::Zero)
        .unwrap();
    let rot = PhaseTensor::from_interleaved(
        flat(&[0.0, -1.0, 1.0, 0.0], 2, 2),
        vec![1],
        Likeness::One,
    )
    .unwrap();

    let out = rot
        .apply(&cov)
        .unwrap()
        .apply(&rot.transpose().unwrap())
        .unwrap();
    assert_eq!(out.out_modes(), &[0, 1, 2]);
    assert_eq!(out.in_modes(), &[0, 1, 2]);

    // dense reference: R_full cov R_full^T
    let mut r_full = vec![0.0; 36];
    for i in [0, 1, 4, 5] {
        r_full[i * 6 + i] = 1.0;
    }
    r_full[2 * 6 + 3] = -1.0;
    r_full[3 * 6 + 2] = 1.0;
    let r = PhaseTensor::from_interleaved(flat(&r_full, 6, 6), ModeSpec::Inferred, Likeness::One)
        .unwrap();
    let expected = r.apply(&cov).unwrap().apply(&r.transpose().unwrap()).unwrap();
    assert!(out.allclose(&expected, &Tolerance::default()));
}

#[test]
fn test_vector_matrix_vector_chain() {
    let m = iota_matrix(vec![0, 1], Likeness::Zero);
    let v = vector(&[1.0, 0.0, 0.0, 1.0], vec![0, 1]);
    let mv = m.apply(&v).unwrap();
    // v^T M v as (v^T M) v and v^T (M v)
    let left = tensor(v.matmul(&m).unwrap()).dot(&v).unwrap();
    let right = v.dot(&mv).unwrap();
    assert!((left - right).abs() < 1e-12);
}

#[test]
fn test_replicate_like_then_add() {
    let single = PhaseTensor::<f64>::identity(&[0], Likeness::Zero).unwrap().scale(0.5).unwrap();
    let global = PhaseTensor::<f64>::identity(&[0, 1, 2, 3], Likeness::Zero).unwrap();
    let spread = single.replicate_like(&global).unwrap();
    let sum = spread.add(&global).unwrap();
    let expected = global.scale(1.5).unwrap();
    assert!(sum.allclose(&expected, &Tolerance::exact()));
}

#[test]
fn test_error_kinds() {
    let v = vector(&[1.0, 2.0], vec![0]);
    assert!(matches!(
        v.transpose(),
        Err(TensorError::InvalidOperation { .. })
    ));
    assert!(matches!(
        v.block(&[0], &[0]),
        Err(TensorError::InvalidOperation { .. })
    ));
    assert!(matches!(
        PhaseTensor::<f64>::one_like().add(&PhaseTensor::one_like()),
        Err(TensorError::Unsupported { .. })
    ));
    assert!(matches!(
        PhaseTensor::from_interleaved(flat(&[0.0; 16], 4, 4), (vec![0, 1], vec![1, 2]), Likeness::Zero),
        Err(TensorError::InvalidConstruction(_))
    ));
}
