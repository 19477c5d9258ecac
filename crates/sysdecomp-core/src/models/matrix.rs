//! Transition probability matrix over binary causes and effects.

use ndarray::{Array2, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

use crate::errors::{TensorError, TensorResult};

/// Conditional probabilities of every effect given every cause state.
///
/// Rows: `2^causes`, row index is the little-endian cause state (bit `i` of
/// the row index is the state of cause `i`).
/// Columns: `2 * effects`, effect `e` owns `[2e, 2e + 1]` holding
/// `[P(e = 0), P(e = 1)]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct TransitionMatrix {
    data: Array2<f64>,
    causes: usize,
    effects: usize,
}

impl TransitionMatrix {
    /// Wrap a dense matrix, checking the power-of-two row count and the
    /// column-pair layout. Probability contents are not checked.
    pub fn new(data: Array2<f64>) -> TensorResult<Self> {
        let (rows, columns) = data.dim();
        if rows == 0 || !rows.is_power_of_two() {
            return Err(TensorError::InvalidMatrixShape {
                rows,
                columns,
                reason: "row count must be a power of two".to_string(),
            });
        }
        if columns == 0 || columns % 2 != 0 {
            return Err(TensorError::InvalidMatrixShape {
                rows,
                columns,
                reason: "column count must be a positive multiple of two".to_string(),
            });
        }
        Ok(Self {
            causes: rows.trailing_zeros() as usize,
            effects: columns / 2,
            data,
        })
    }

    /// Build from nested rows, as delivered by JSON collaborators.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> TensorResult<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().find(|r| r.len() != width) {
            return Err(TensorError::InvalidMatrixShape {
                rows: height,
                columns: bad.len(),
                reason: format!("ragged rows: expected {width} columns"),
            });
        }
        let flat: Vec<f64> = rows.into_iter().flatten().collect();
        let data = Array2::from_shape_vec((height, width), flat).map_err(|e| {
            TensorError::InvalidMatrixShape {
                rows: height,
                columns: width,
                reason: e.to_string(),
            }
        })?;
        Self::new(data)
    }

    pub fn causes(&self) -> usize {
        self.causes
    }

    pub fn effects(&self) -> usize {
        self.effects
    }

    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }

    /// The `rows x 2` column pair of one effect.
    pub fn effect_columns(&self, effect: usize) -> TensorResult<ArrayView2<'_, f64>> {
        self.check_effect(effect)?;
        Ok(self
            .data
            .slice(ndarray::s![.., 2 * effect..2 * effect + 2]))
    }

    /// Overwrite the column pair of one effect.
    pub fn replace_effect_columns(
        &mut self,
        effect: usize,
        columns: ArrayView2<'_, f64>,
    ) -> TensorResult<()> {
        self.check_effect(effect)?;
        let expected = (self.data.nrows(), 2);
        if columns.dim() != expected {
            return Err(TensorError::DimensionMismatch {
                expected: expected.0 * expected.1,
                actual: columns.len(),
                context: format!("replacement columns for effect {effect}"),
            });
        }
        self.data
            .slice_mut(ndarray::s![.., 2 * effect..2 * effect + 2])
            .assign(&columns);
        Ok(())
    }

    /// Sum of each effect's column pair per row. All ones for a normalized matrix.
    pub fn column_pair_sums(&self) -> Array2<f64> {
        let mut sums = Array2::zeros((self.data.nrows(), self.effects));
        for (effect, mut column) in sums.axis_iter_mut(Axis(1)).enumerate() {
            let pair = self.data.slice(ndarray::s![.., 2 * effect..2 * effect + 2]);
            column.assign(&pair.sum_axis(Axis(1)));
        }
        sums
    }

    fn check_effect(&self, effect: usize) -> TensorResult<()> {
        if effect >= self.effects {
            return Err(TensorError::IndexOutOfRange {
                index: effect,
                bound: self.effects,
                context: "effect column pair".to_string(),
            });
        }
        Ok(())
    }
}

impl TryFrom<Vec<Vec<f64>>> for TransitionMatrix {
    type Error = TensorError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<TransitionMatrix> for Vec<Vec<f64>> {
    fn from(matrix: TransitionMatrix) -> Self {
        matrix.data.outer_iter().map(|row| row.to_vec()).collect()
    }
}
