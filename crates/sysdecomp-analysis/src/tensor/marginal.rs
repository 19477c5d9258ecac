//! Averaging out binary variables, and the inverse duplication.

use ndarray::{Array2, ArrayView2, Axis};
use sysdecomp_core::errors::{TensorError, TensorResult};

/// Axis whose index encodes the variables being marginalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarginalAxis {
    Rows,
    Columns,
}

impl MarginalAxis {
    fn axis(self) -> Axis {
        match self {
            Self::Rows => Axis(0),
            Self::Columns => Axis(1),
        }
    }
}

/// Insert a zero bit at `position`, shifting higher bits up.
fn insert_zero_bit(index: usize, position: usize) -> usize {
    let low = index & ((1 << position) - 1);
    ((index >> position) << (position + 1)) | low
}

/// Drop the bit at `position`, shifting higher bits down.
fn remove_bit(index: usize, position: usize) -> usize {
    let low = index & ((1 << position) - 1);
    ((index >> (position + 1)) << position) | low
}

fn check_axis_len(
    matrix: &ArrayView2<'_, f64>,
    var_count: usize,
    axis: MarginalAxis,
) -> TensorResult<()> {
    let expected = 1usize << var_count;
    let actual = matrix.len_of(axis.axis());
    if actual != expected {
        return Err(TensorError::DimensionMismatch {
            expected,
            actual,
            context: format!("{axis:?} length for {var_count} variables"),
        });
    }
    Ok(())
}

/// Average out the variable at `position`.
///
/// The axis has `2^var_count` entries and shrinks to `2^(var_count - 1)`:
/// each output entry is the mean of the two entries differing only at bit
/// `position`.
pub fn marginalize(
    matrix: ArrayView2<'_, f64>,
    var_count: usize,
    position: usize,
    axis: MarginalAxis,
) -> TensorResult<Array2<f64>> {
    if position >= var_count {
        return Err(TensorError::IndexOutOfRange {
            index: position,
            bound: var_count,
            context: "marginalized position".to_string(),
        });
    }
    check_axis_len(&matrix, var_count, axis)?;

    let ax = axis.axis();
    let mut shape = [matrix.nrows(), matrix.ncols()];
    shape[ax.index()] /= 2;
    let mut reduced = Array2::zeros(shape);
    for (index, mut lane) in reduced.axis_iter_mut(ax).enumerate() {
        let lo = insert_zero_bit(index, position);
        let hi = lo | (1 << position);
        let mean = (&matrix.index_axis(ax, lo) + &matrix.index_axis(ax, hi)) / 2.0;
        lane.assign(&mean);
    }
    Ok(reduced)
}

/// Marginalize several positions, one bit per step.
///
/// Positions are in the original index space. They are processed ascending;
/// after each step the remaining positions are renumbered down by one and
/// `var_count` shrinks. No positions returns a copy.
pub fn recursive_marginalization(
    matrix: ArrayView2<'_, f64>,
    var_count: usize,
    positions: &[usize],
    axis: MarginalAxis,
) -> TensorResult<Array2<f64>> {
    check_axis_len(&matrix, var_count, axis)?;
    let mut ordered = positions.to_vec();
    ordered.sort_unstable();
    ordered.dedup();

    let mut current = matrix.to_owned();
    for (step, position) in ordered.into_iter().enumerate() {
        current = marginalize(current.view(), var_count - step, position - step, axis)?;
    }
    Ok(current)
}

/// Inverse shape of [`recursive_marginalization`]: re-insert each position
/// by duplicating the reduced entries along it.
///
/// `positions` are in the expanded index space. The result is constant along
/// every re-inserted bit.
pub fn expand(
    matrix: ArrayView2<'_, f64>,
    reduced_var_count: usize,
    positions: &[usize],
    axis: MarginalAxis,
) -> TensorResult<Array2<f64>> {
    check_axis_len(&matrix, reduced_var_count, axis)?;
    let mut ordered = positions.to_vec();
    ordered.sort_unstable();
    ordered.dedup();

    let ax = axis.axis();
    let mut current = matrix.to_owned();
    for (step, position) in ordered.into_iter().enumerate() {
        let var_count = reduced_var_count + step;
        if position > var_count {
            return Err(TensorError::IndexOutOfRange {
                index: position,
                bound: var_count + 1,
                context: "expanded position".to_string(),
            });
        }
        let mut shape = [current.nrows(), current.ncols()];
        shape[ax.index()] *= 2;
        let mut grown = Array2::zeros(shape);
        for (index, mut lane) in grown.axis_iter_mut(ax).enumerate() {
            lane.assign(&current.index_axis(ax, remove_bit(index, position)));
        }
        current = grown;
    }
    Ok(current)
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn bit_helpers_are_inverse() {
        for index in 0..16 {
            for position in 0..4 {
                assert_eq!(remove_bit(insert_zero_bit(index, position), position), index);
            }
        }
    }

    #[test]
    fn marginalize_rows_averages_pairs() {
        // rows indexed by (a, b) little-endian: r = a + 2b
        let m = array![[1.0, 0.0], [0.0, 1.0], [0.5, 0.5], [0.25, 0.75]];
        let over_a = marginalize(m.view(), 2, 0, MarginalAxis::Rows).unwrap();
        assert_eq!(over_a, array![[0.5, 0.5], [0.375, 0.625]]);
        let over_b = marginalize(m.view(), 2, 1, MarginalAxis::Rows).unwrap();
        assert_eq!(over_b, array![[0.75, 0.25], [0.125, 0.875]]);
    }

    #[test]
    fn marginalize_columns() {
        let m = array![[0.1, 0.2, 0.3, 0.4]];
        let reduced = marginalize(m.view(), 2, 1, MarginalAxis::Columns).unwrap();
        assert!((reduced[[0, 0]] - 0.2).abs() < 1e-12);
        assert!((reduced[[0, 1]] - 0.3).abs() < 1e-12);
    }

    #[test]
    fn rejects_position_out_of_range() {
        let m = array![[1.0, 0.0], [0.0, 1.0]];
        assert!(matches!(
            marginalize(m.view(), 1, 1, MarginalAxis::Rows),
            Err(TensorError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn expand_then_marginalize_is_identity() {
        let m = array![[0.2, 0.8], [0.6, 0.4]];
        let grown = expand(m.view(), 1, &[0, 2], MarginalAxis::Rows).unwrap();
        assert_eq!(grown.nrows(), 8);
        let back = recursive_marginalization(grown.view(), 3, &[0, 2], MarginalAxis::Rows).unwrap();
        assert_eq!(back, m);
    }
}
