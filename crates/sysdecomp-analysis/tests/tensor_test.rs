//! Tensor kernel properties: normalization, marginalization, restriction.

use ndarray::{array, Array2};
use proptest::prelude::*;
use sysdecomp_analysis::tensor::{
    binary_position, expand, marginalize, product_tensor, product_tensor_with_cut,
    recursive_marginalization, restrict_system, MarginalAxis, Projection,
};
use sysdecomp_core::{BinaryDistribution, TransitionMatrix};

/// Normalized matrix with `2^causes` rows and `effects` column pairs.
fn normalized(causes: usize, effects: usize, ones: &[f64]) -> Array2<f64> {
    let rows = 1 << causes;
    let mut m = Array2::zeros((rows, 2 * effects));
    for r in 0..rows {
        for e in 0..effects {
            let p = ones[(r * effects + e) % ones.len()];
            m[[r, 2 * e]] = 1.0 - p;
            m[[r, 2 * e + 1]] = p;
        }
    }
    m
}

proptest! {
    #[test]
    fn test_product_tensor_rows_sum_to_one(
        causes in 0usize..3,
        effects in 1usize..4,
        ones in prop::collection::vec(0.0f64..=1.0, 1..16),
    ) {
        let m = normalized(causes, effects, &ones);
        let tensor = product_tensor(m.view(), None).unwrap();
        prop_assert_eq!(tensor.ncols(), 1 << effects);
        for row in tensor.rows() {
            prop_assert!((row.sum() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_marginalization_keeps_pairs_normalized(
        causes in 1usize..4,
        ones in prop::collection::vec(0.0f64..=1.0, 1..16),
        position_seed in 0usize..8,
    ) {
        let m = normalized(causes, 2, &ones);
        let position = position_seed % causes;
        let reduced = marginalize(m.view(), causes, position, MarginalAxis::Rows).unwrap();
        prop_assert_eq!(reduced.nrows(), 1 << (causes - 1));
        for row in reduced.rows() {
            prop_assert!((row[0] + row[1] - 1.0).abs() < 1e-9);
            prop_assert!((row[2] + row[3] - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_expand_is_undone_by_marginalization(
        ones in prop::collection::vec(0.0f64..=1.0, 1..8),
        position in 0usize..3,
    ) {
        let m = normalized(2, 1, &ones);
        let grown = expand(m.view(), 2, &[position], MarginalAxis::Rows).unwrap();
        let back = recursive_marginalization(grown.view(), 3, &[position], MarginalAxis::Rows).unwrap();
        prop_assert_eq!(back, m);
    }
}

#[test]
fn test_binary_position_reads_little_endian() {
    let bits = [true, false, true];
    assert_eq!(binary_position(&bits, Projection::Full), 5);
    assert_eq!(binary_position(&bits, Projection::Mask(&[2])), 1);
    assert_eq!(binary_position(&bits, Projection::Unmask(&[0])), 2);
}

#[test]
fn test_recursive_marginalization_matches_stepwise() {
    let m = normalized(3, 1, &[0.1, 0.5, 0.9, 0.3, 0.7]);
    let all = recursive_marginalization(m.view(), 3, &[2, 0], MarginalAxis::Rows).unwrap();
    let step = marginalize(m.view(), 3, 0, MarginalAxis::Rows).unwrap();
    let step = marginalize(step.view(), 2, 1, MarginalAxis::Rows).unwrap();
    assert_eq!(all, step);
}

#[test]
fn test_recursive_marginalization_without_positions_copies() {
    let m = array![[0.25, 0.75], [0.5, 0.5]];
    let same = recursive_marginalization(m.view(), 1, &[], MarginalAxis::Rows).unwrap();
    assert_eq!(same, m);
}

#[test]
fn test_recursive_marginalization_checks_shape() {
    let m = array![[0.25, 0.75], [0.5, 0.5], [0.5, 0.5]];
    assert!(recursive_marginalization(m.view(), 2, &[0], MarginalAxis::Rows).is_err());
}

#[test]
fn test_product_tensor_with_cut_checks_widths() {
    let m = array![[0.1, 0.9, 0.4, 0.6, 0.5]];
    assert!(product_tensor_with_cut(m.view(), 0, 2, &[0]).is_err());
    let m = array![[0.1, 0.9, 0.4, 0.6]];
    assert!(product_tensor_with_cut(m.view(), 0, 4, &[0]).is_err());
    assert!(product_tensor_with_cut(m.view(), 0, 2, &[5]).is_err());
}

#[test]
fn test_product_tensor_with_cut_multiplies_halves() {
    // left: two effects at output bits 0 and 2, right: one effect at bit 1
    let left = [0.1, 0.2, 0.3, 0.4];
    let right = [0.25, 0.75];
    let m = Array2::from_shape_vec((1, 6), [left.as_slice(), right.as_slice()].concat()).unwrap();
    let joint = product_tensor_with_cut(m.view(), 0, 4, &[0, 2]).unwrap();
    assert_eq!(joint.len(), 8);
    for i in 0..8usize {
        let l = (i & 1) | (((i >> 2) & 1) << 1);
        let r = (i >> 1) & 1;
        assert!((joint[i] - left[l] * right[r]).abs() < 1e-12, "index {i}");
    }
}

#[test]
fn test_restrict_system_marginalizes_dropped_causes() {
    let matrix = TransitionMatrix::from_rows(vec![
        vec![0.8, 0.2, 0.9, 0.1],
        vec![0.1, 0.9, 0.4, 0.6],
        vec![0.8, 0.2, 0.3, 0.7],
        vec![0.1, 0.9, 0.05, 0.95],
    ])
    .unwrap();
    let distribution: BinaryDistribution = "10".parse().unwrap();
    let (sub, bits) = restrict_system(&matrix, &distribution, &[1], &[1]).unwrap();
    assert_eq!((sub.causes(), sub.effects()), (1, 1));
    assert!((sub.data()[[0, 1]] - 0.35).abs() < 1e-12);
    assert!((sub.data()[[1, 1]] - 0.825).abs() < 1e-12);
    assert_eq!(bits.to_string(), "0");
}
