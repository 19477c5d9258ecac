//! Re-exports of performance-oriented collection types.

pub use rustc_hash::{FxHashMap, FxHashSet};
pub use smallvec::SmallVec;

/// Ordered tuple of distinct effect or cause indices.
///
/// Used as memo keys and partition sides. Sorted ascending and never mutated
/// after construction; systems rarely exceed a handful of variables per side.
pub type IndexSubset = SmallVec<[usize; 4]>;

/// Build an `IndexSubset` from any iterator of indices, sorted and deduplicated.
pub fn index_subset<I: IntoIterator<Item = usize>>(indices: I) -> IndexSubset {
    let mut subset: IndexSubset = indices.into_iter().collect();
    subset.sort_unstable();
    subset.dedup();
    subset
}

/// Elements of `universe` not present in `subset`, in universe order.
pub fn complement(universe: &[usize], subset: &[usize]) -> IndexSubset {
    universe
        .iter()
        .copied()
        .filter(|i| !subset.contains(i))
        .collect()
}
