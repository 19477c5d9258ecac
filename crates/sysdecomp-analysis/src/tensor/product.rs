//! Product tensors: joint distributions from per-effect marginals.

use ndarray::{Array1, Array2, ArrayView2};
use sysdecomp_core::errors::{TensorError, TensorResult};

/// Joint tensor of every effect for one or all rows of `matrix`.
///
/// `matrix` has `2E` columns. Output column `j` is the product over effects
/// `k` of `matrix[row][2k + bit_k(j)]`, giving `2^E` columns. With `row` set
/// the output has a single row.
pub fn product_tensor(matrix: ArrayView2<'_, f64>, row: Option<usize>) -> TensorResult<Array2<f64>> {
    let (rows, columns) = matrix.dim();
    if columns == 0 || columns % 2 != 0 {
        return Err(TensorError::InvalidMatrixShape {
            rows,
            columns,
            reason: "product tensor needs column pairs".to_string(),
        });
    }
    let components = columns / 2;
    let width = 1usize << components;

    let source_rows: Vec<usize> = match row {
        Some(r) if r >= rows => {
            return Err(TensorError::IndexOutOfRange {
                index: r,
                bound: rows,
                context: "product tensor row".to_string(),
            })
        }
        Some(r) => vec![r],
        None => (0..rows).collect(),
    };

    let mut tensor = Array2::zeros((source_rows.len(), width));
    for (out_row, &source) in source_rows.iter().enumerate() {
        for j in 0..width {
            tensor[[out_row, j]] = (0..components)
                .map(|k| matrix[[source, 2 * k + ((j >> k) & 1)]])
                .fold(1.0, |acc, p| acc * p);
        }
    }
    Ok(tensor)
}

/// Rebuild one joint tensor from two independently computed halves.
///
/// Row `row` of `matrix` holds `[left | right]` with the left half occupying
/// the first `cut` columns. `left_bits` lists, in left-index order, the
/// output bit positions owned by the left half; the remaining output bits
/// address the right half in ascending order. A single-row matrix ignores
/// `row`.
pub fn product_tensor_with_cut(
    matrix: ArrayView2<'_, f64>,
    row: usize,
    cut: usize,
    left_bits: &[usize],
) -> TensorResult<Array1<f64>> {
    let (rows, columns) = matrix.dim();
    let row = if rows == 1 { 0 } else { row };
    if row >= rows {
        return Err(TensorError::IndexOutOfRange {
            index: row,
            bound: rows,
            context: "product tensor with cut row".to_string(),
        });
    }

    let left_width = 1usize << left_bits.len();
    if cut != left_width || cut > columns {
        return Err(TensorError::DimensionMismatch {
            expected: left_width,
            actual: cut,
            context: "left half width".to_string(),
        });
    }
    let right_width = columns - cut;
    if right_width == 0 || !right_width.is_power_of_two() {
        return Err(TensorError::InvalidMatrixShape {
            rows,
            columns,
            reason: format!("right half width {right_width} is not a power of two"),
        });
    }

    let total_bits = left_bits.len() + right_width.trailing_zeros() as usize;
    let mut route: Vec<Option<usize>> = vec![None; total_bits];
    for (slot, &bit) in left_bits.iter().enumerate() {
        if bit >= total_bits || route[bit].is_some() {
            return Err(TensorError::IndexOutOfRange {
                index: bit,
                bound: total_bits,
                context: "left bit position".to_string(),
            });
        }
        route[bit] = Some(slot);
    }

    let values = matrix.row(row);
    let tensor = (0..1usize << total_bits)
        .map(|i| {
            let (mut left, mut right, mut right_slot) = (0usize, 0usize, 0usize);
            for (position, owner) in route.iter().enumerate() {
                let bit = (i >> position) & 1;
                match owner {
                    Some(slot) => left |= bit << slot,
                    None => {
                        right |= bit << right_slot;
                        right_slot += 1;
                    }
                }
            }
            values[left] * values[cut + right]
        })
        .collect();
    Ok(tensor)
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn single_effect_is_the_column_pair() {
        let m = array![[0.25, 0.75], [0.5, 0.5]];
        let t = product_tensor(m.view(), None).unwrap();
        assert_eq!(t, m);
    }

    #[test]
    fn bit_k_of_the_column_addresses_effect_k() {
        // effect 0: [0.1, 0.9], effect 1: [0.4, 0.6]
        let m = array![[0.1, 0.9, 0.4, 0.6]];
        let t = product_tensor(m.view(), Some(0)).unwrap();
        let expected = [0.1 * 0.4, 0.9 * 0.4, 0.1 * 0.6, 0.9 * 0.6];
        for (got, want) in t.row(0).iter().zip(expected) {
            assert!((got - want).abs() < 1e-12);
        }
    }

    #[test]
    fn cut_with_left_bit_zero_matches_product_tensor() {
        let left = [0.1, 0.9];
        let right = [0.4, 0.6];
        let m = array![[left[0], left[1], right[0], right[1]]];
        let joint = product_tensor_with_cut(m.view(), 0, 2, &[0]).unwrap();
        let direct = product_tensor(m.view(), Some(0)).unwrap();
        assert_eq!(joint, direct.row(0));
    }

    #[test]
    fn cut_routes_left_half_to_requested_bit() {
        let m = array![[0.1, 0.9, 0.4, 0.6]];
        let joint = product_tensor_with_cut(m.view(), 0, 2, &[1]).unwrap();
        // bit 1 is the left variable, bit 0 the right one.
        assert!((joint[0b01] - 0.1 * 0.6).abs() < 1e-12);
        assert!((joint[0b10] - 0.9 * 0.4).abs() < 1e-12);
    }

    #[test]
    fn rejects_odd_columns_and_bad_rows() {
        let m = array![[0.5, 0.5, 1.0]];
        assert!(matches!(
            product_tensor(m.view(), None),
            Err(TensorError::InvalidMatrixShape { .. })
        ));
        let m = array![[0.5, 0.5]];
        assert!(product_tensor(m.view(), Some(3)).is_err());
    }
}
