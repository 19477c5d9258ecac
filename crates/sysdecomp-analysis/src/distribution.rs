//! Conditional joint distributions of effect subsets, built from cached
//! single-effect marginals.

use ndarray::{concatenate, Array1, Axis};
use sysdecomp_core::errors::{TensorError, TensorResult};
use sysdecomp_core::types::collections::{complement, index_subset};
use sysdecomp_core::{BinaryDistribution, Partition, TransitionMatrix};

use crate::memo::{Memo, MemoScope};
use crate::tensor::{binary_position, product_tensor_with_cut, recursive_marginalization};
use crate::tensor::{MarginalAxis, Projection};

/// Builds `P(effects | causes = bits)` for one matrix and binary distribution.
///
/// Causes outside the requested subset are averaged out before the row
/// selected by the remaining bits is read. Results are memoized for the
/// lifetime of the builder, which is one search request.
#[derive(Debug)]
pub struct DistributionBuilder<'a> {
    matrix: &'a TransitionMatrix,
    distribution: &'a BinaryDistribution,
    cause_universe: Vec<usize>,
    memo: Memo,
    hits: usize,
    misses: usize,
}

impl<'a> DistributionBuilder<'a> {
    pub fn new(
        matrix: &'a TransitionMatrix,
        distribution: &'a BinaryDistribution,
    ) -> TensorResult<Self> {
        if distribution.len() != matrix.causes() {
            return Err(TensorError::InvalidDistribution {
                value: distribution.to_string(),
                reason: format!("expected {} bits, one per cause", matrix.causes()),
            });
        }
        Ok(Self {
            matrix,
            distribution,
            cause_universe: (0..matrix.causes()).collect(),
            memo: Memo::new(),
            hits: 0,
            misses: 0,
        })
    }

    pub fn memo(&self) -> &Memo {
        &self.memo
    }

    pub fn memo_hits(&self) -> usize {
        self.hits
    }

    pub fn memo_misses(&self) -> usize {
        self.misses
    }

    /// `[P(e = 0), P(e = 1)]` given the bits of `causes` only.
    pub fn effect_marginal(&mut self, effect: usize, causes: &[usize]) -> TensorResult<Array1<f64>> {
        if let Some(cached) = self.memo.get(&[effect], causes, MemoScope::Marginalization) {
            self.hits += 1;
            return Ok(cached.clone());
        }
        self.misses += 1;

        let removed = complement(&self.cause_universe, causes);
        let columns = self.matrix.effect_columns(effect)?;
        let reduced =
            recursive_marginalization(columns, self.matrix.causes(), &removed, MarginalAxis::Rows)?;
        let row = binary_position(self.distribution.bits(), Projection::Unmask(&removed));
        let marginal = reduced.row(row).to_owned();

        self.memo
            .add(&[effect], causes, MemoScope::Marginalization, marginal.clone());
        Ok(marginal)
    }

    /// Joint distribution of `effects` given `causes`. `None` for no effects.
    ///
    /// Effects are folded in from the right: each step peels the next effect
    /// off the front and multiplies its marginal into the suffix already
    /// built. Every suffix is memoized, and the longest cached suffix is
    /// reused as the starting point.
    pub fn distribution(
        &mut self,
        effects: &[usize],
        causes: &[usize],
    ) -> TensorResult<Option<Array1<f64>>> {
        let effects = index_subset(effects.iter().copied());
        let causes = index_subset(causes.iter().copied());
        self.check_subsets(&effects, &causes)?;
        if effects.is_empty() {
            return Ok(None);
        }

        let mut start = effects.len();
        let mut joint: Option<Array1<f64>> = None;
        for s in 0..effects.len() {
            if let Some(cached) = self.memo.get(&effects[s..], &causes, MemoScope::Distribution) {
                joint = Some(cached.clone());
                start = s;
                break;
            }
        }
        if start == 0 {
            self.hits += 1;
            return Ok(joint);
        }
        self.misses += 1;

        for s in (0..start).rev() {
            let marginal = self.effect_marginal(effects[s], &causes)?;
            let next = match joint.take() {
                None => marginal,
                // Suffixes are ascending, so the peeled effect is always bit 0.
                Some(suffix) => combine(&marginal, &suffix, &[0])?,
            };
            self.memo
                .add(&effects[s..], &causes, MemoScope::Distribution, next.clone());
            joint = Some(next);
        }
        Ok(joint)
    }

    /// Unpartitioned distribution over every effect given every cause.
    pub fn baseline(&mut self) -> TensorResult<Array1<f64>> {
        let effects: Vec<usize> = (0..self.matrix.effects()).collect();
        let causes = self.cause_universe.clone();
        self.distribution(&effects, &causes)?
            .ok_or_else(|| no_effects("baseline"))
    }

    /// Product of the two side distributions of `partition`, laid out over
    /// the full effect universe.
    pub fn partitioned(&mut self, partition: &Partition) -> TensorResult<Array1<f64>> {
        let side_a = self.distribution(&partition.effect_a, &partition.cause_a)?;
        let side_b = self.distribution(&partition.effect_b, &partition.cause_b)?;
        match (side_a, side_b) {
            (Some(a), Some(b)) => {
                let all = index_subset(
                    partition
                        .effect_a
                        .iter()
                        .chain(&partition.effect_b)
                        .copied(),
                );
                let left_bits: Vec<usize> = partition
                    .effect_a
                    .iter()
                    .filter_map(|e| all.iter().position(|x| x == e))
                    .collect();
                combine(&a, &b, &left_bits)
            }
            (Some(only), None) | (None, Some(only)) => Ok(only),
            (None, None) => Err(no_effects("partition")),
        }
    }

    fn check_subsets(&self, effects: &[usize], causes: &[usize]) -> TensorResult<()> {
        if let Some(&bad) = effects.iter().find(|&&e| e >= self.matrix.effects()) {
            return Err(TensorError::IndexOutOfRange {
                index: bad,
                bound: self.matrix.effects(),
                context: "effect subset".to_string(),
            });
        }
        if let Some(&bad) = causes.iter().find(|&&c| c >= self.matrix.causes()) {
            return Err(TensorError::IndexOutOfRange {
                index: bad,
                bound: self.matrix.causes(),
                context: "cause subset".to_string(),
            });
        }
        Ok(())
    }
}

fn no_effects(context: &str) -> TensorError {
    TensorError::DimensionMismatch {
        expected: 1,
        actual: 0,
        context: format!("{context} effect count"),
    }
}

/// Joint tensor of two independent halves, `left` owning `left_bits`.
fn combine(left: &Array1<f64>, right: &Array1<f64>, left_bits: &[usize]) -> TensorResult<Array1<f64>> {
    let joined = concatenate(Axis(0), &[left.view(), right.view()]).map_err(|e| {
        TensorError::DimensionMismatch {
            expected: left.len() + right.len(),
            actual: 0,
            context: e.to_string(),
        }
    })?;
    product_tensor_with_cut(joined.view().insert_axis(Axis(0)), 0, left.len(), left_bits)
}
