//! Cause-by-effect edge costs.

use ndarray::{Array2, Axis};
use sysdecomp_core::constants::INFINITE_WEIGHT;

/// `cost[c][e]` is the distance caused by cutting the edge from cause `c`
/// to effect `e`. Unscored edges hold infinity.
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix {
    costs: Array2<f64>,
}

impl CostMatrix {
    pub fn new(causes: usize, effects: usize) -> Self {
        Self {
            costs: Array2::from_elem((causes, effects), INFINITE_WEIGHT),
        }
    }

    pub fn from_array(costs: Array2<f64>) -> Self {
        Self { costs }
    }

    pub fn causes(&self) -> usize {
        self.costs.nrows()
    }

    pub fn effects(&self) -> usize {
        self.costs.ncols()
    }

    pub fn get(&self, cause: usize, effect: usize) -> f64 {
        self.costs[[cause, effect]]
    }

    pub fn set(&mut self, cause: usize, effect: usize, cost: f64) {
        self.costs[[cause, effect]] = cost;
    }

    /// Total cost per cause.
    pub fn row_totals(&self) -> Vec<f64> {
        self.costs.sum_axis(Axis(1)).to_vec()
    }

    /// Total cost per effect.
    pub fn column_totals(&self) -> Vec<f64> {
        self.costs.sum_axis(Axis(0)).to_vec()
    }

    pub fn as_array(&self) -> &Array2<f64> {
        &self.costs
    }
}
