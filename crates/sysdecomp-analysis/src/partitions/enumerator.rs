//! Bipartitions of an effect universe and a cause universe.
//!
//! Side A takes a proper nonempty subset of each universe; side B is the
//! complement. Singleton subsets are additionally paired with an empty
//! subset of the other universe the first time they appear, so every
//! single-variable side is covered. A one-effect, one-cause system has the
//! single split of its effect from its cause.

use itertools::Itertools;
use sysdecomp_core::types::collections::index_subset;
use sysdecomp_core::types::{FxHashSet, IndexSubset};
use sysdecomp_core::Partition;

/// Every subset of `universe` with size in `1..len`, by size then
/// lexicographic order.
pub fn proper_subsets(universe: &[usize]) -> Vec<IndexSubset> {
    (1..universe.len())
        .flat_map(|k| universe.iter().copied().combinations(k))
        .map(index_subset)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Universe {
    Effect,
    Cause,
}

/// All partitions in a deterministic order.
///
/// For each effect subset, for each cause subset: first the not yet emitted
/// singleton seeds, then the pair itself. When one universe has no proper
/// subsets, the other universe's singleton seeds are emitted on their own.
/// Empty only when a universe is empty or both universes together hold a
/// single variable.
pub fn generate_partitions(effect_universe: &[usize], cause_universe: &[usize]) -> Vec<Partition> {
    let effect_subsets = proper_subsets(effect_universe);
    let cause_subsets = proper_subsets(cause_universe);
    let side = |effects: &[usize], causes: &[usize]| {
        Partition::from_side_a(effect_universe, cause_universe, effects, causes)
    };

    let mut partitions = Vec::new();
    let mut seeded: FxHashSet<(Universe, IndexSubset)> = FxHashSet::default();
    for effects in &effect_subsets {
        for causes in &cause_subsets {
            if effects.len() == 1 && seeded.insert((Universe::Effect, effects.clone())) {
                partitions.push(side(effects, &[]));
            }
            if causes.len() == 1 && seeded.insert((Universe::Cause, causes.clone())) {
                partitions.push(side(&[], causes));
            }
            partitions.push(side(effects, causes));
        }
    }

    if effect_subsets.is_empty() {
        partitions.extend(cause_subsets.iter().filter(|c| c.len() == 1).map(|c| side(&[], c)));
    }
    if cause_subsets.is_empty() {
        partitions.extend(effect_subsets.iter().filter(|e| e.len() == 1).map(|e| side(e, &[])));
    }
    // One effect against one cause.
    if partitions.is_empty() && effect_universe.len() == 1 && cause_universe.len() == 1 {
        partitions.push(side(effect_universe, &[]));
    }

    tracing::debug!(
        effects = effect_universe.len(),
        causes = cause_universe.len(),
        partitions = partitions.len(),
        "generated partitions"
    );
    partitions
}
