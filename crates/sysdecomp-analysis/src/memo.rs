//! Per-request cache of partial distributions.
//!
//! Keys are `(effect subset, cause subset)` in ascending order. The
//! distribution scope holds joint distributions of effect suffixes; the
//! marginalization scope holds single-effect marginals. The first value
//! stored under a key is kept.

use std::collections::hash_map::Entry;

use ndarray::Array1;
use sysdecomp_core::types::{FxHashMap, IndexSubset};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemoScope {
    Distribution,
    Marginalization,
}

type MemoKey = (IndexSubset, IndexSubset);

fn key(effects: &[usize], causes: &[usize]) -> MemoKey {
    (IndexSubset::from_slice(effects), IndexSubset::from_slice(causes))
}

#[derive(Debug, Default)]
pub struct Memo {
    distributions: FxHashMap<MemoKey, Array1<f64>>,
    marginalizations: FxHashMap<MemoKey, Array1<f64>>,
}

impl Memo {
    pub fn new() -> Self {
        Self::default()
    }

    fn scope(&self, scope: MemoScope) -> &FxHashMap<MemoKey, Array1<f64>> {
        match scope {
            MemoScope::Distribution => &self.distributions,
            MemoScope::Marginalization => &self.marginalizations,
        }
    }

    pub fn get(&self, effects: &[usize], causes: &[usize], scope: MemoScope) -> Option<&Array1<f64>> {
        self.scope(scope).get(&key(effects, causes))
    }

    /// Store `value` unless the key is already present. Returns whether it was stored.
    pub fn add(
        &mut self,
        effects: &[usize],
        causes: &[usize],
        scope: MemoScope,
        value: Array1<f64>,
    ) -> bool {
        let map = match scope {
            MemoScope::Distribution => &mut self.distributions,
            MemoScope::Marginalization => &mut self.marginalizations,
        };
        match map.entry(key(effects, causes)) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(value);
                true
            }
        }
    }

    pub fn len(&self, scope: MemoScope) -> usize {
        self.scope(scope).len()
    }

    pub fn is_empty(&self) -> bool {
        self.distributions.is_empty() && self.marginalizations.is_empty()
    }
}
