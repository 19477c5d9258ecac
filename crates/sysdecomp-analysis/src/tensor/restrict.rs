//! Restriction of a system to a sub-universe of variables.

use ndarray::{Array2, Axis};
use sysdecomp_core::errors::{TensorError, TensorResult};
use sysdecomp_core::types::collections::{complement, index_subset};
use sysdecomp_core::{BinaryDistribution, TransitionMatrix};

use super::marginal::{recursive_marginalization, MarginalAxis};

/// Keep only `effects` and `causes`.
///
/// Dropped effects lose their column pairs, dropped causes are averaged out
/// of the rows, and the distribution keeps the bits of the surviving causes.
pub fn restrict_system(
    matrix: &TransitionMatrix,
    distribution: &BinaryDistribution,
    effects: &[usize],
    causes: &[usize],
) -> TensorResult<(TransitionMatrix, BinaryDistribution)> {
    if distribution.len() != matrix.causes() {
        return Err(TensorError::DimensionMismatch {
            expected: matrix.causes(),
            actual: distribution.len(),
            context: "binary distribution length".to_string(),
        });
    }
    let effects = index_subset(effects.iter().copied());
    let causes = index_subset(causes.iter().copied());
    if let Some(&bad) = causes.iter().find(|&&c| c >= matrix.causes()) {
        return Err(TensorError::IndexOutOfRange {
            index: bad,
            bound: matrix.causes(),
            context: "restricted cause".to_string(),
        });
    }
    if effects.is_empty() {
        return Err(TensorError::DimensionMismatch {
            expected: 1,
            actual: 0,
            context: "restricted effects".to_string(),
        });
    }

    if let Some(&bad) = effects.iter().find(|&&e| e >= matrix.effects()) {
        return Err(TensorError::IndexOutOfRange {
            index: bad,
            bound: matrix.effects(),
            context: "restricted effect".to_string(),
        });
    }
    let columns: Vec<usize> = effects.iter().flat_map(|&e| [2 * e, 2 * e + 1]).collect();
    let selected: Array2<f64> = matrix.data().select(Axis(1), &columns);

    let universe: Vec<usize> = (0..matrix.causes()).collect();
    let removed = complement(&universe, &causes);
    let reduced =
        recursive_marginalization(selected.view(), matrix.causes(), &removed, MarginalAxis::Rows)?;

    Ok((TransitionMatrix::new(reduced)?, distribution.project(&causes)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restrict_keeps_selected_columns_and_bits() {
        let matrix = TransitionMatrix::from_rows(vec![
            vec![1.0, 0.0, 0.5, 0.5],
            vec![0.0, 1.0, 0.5, 0.5],
            vec![1.0, 0.0, 0.2, 0.8],
            vec![0.0, 1.0, 0.2, 0.8],
        ])
        .unwrap();
        let distribution: BinaryDistribution = "10".parse().unwrap();
        let (m, d) = restrict_system(&matrix, &distribution, &[0], &[0]).unwrap();
        assert_eq!(m.causes(), 1);
        assert_eq!(m.effects(), 1);
        assert_eq!(m.data().row(0).to_vec(), vec![1.0, 0.0]);
        assert_eq!(m.data().row(1).to_vec(), vec![0.0, 1.0]);
        assert_eq!(d.to_string(), "1");
    }

    #[test]
    fn restrict_rejects_unknown_effect() {
        let matrix = TransitionMatrix::from_rows(vec![vec![0.5, 0.5], vec![0.5, 0.5]]).unwrap();
        let distribution: BinaryDistribution = "0".parse().unwrap();
        assert!(restrict_system(&matrix, &distribution, &[3], &[0]).is_err());
    }
}
