//! Partition shapes produced by the two search families.

use serde::{Deserialize, Serialize};

use crate::types::collections::{complement, index_subset, IndexSubset};

/// A split of effect and cause indices into two sides.
///
/// Side B is the exact complement of side A within each universe. A valid
/// partition never leaves a side with both subsets empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Partition {
    pub effect_a: IndexSubset,
    pub cause_a: IndexSubset,
    pub effect_b: IndexSubset,
    pub cause_b: IndexSubset,
}

impl Partition {
    /// Build side A from the given subsets and derive side B by set difference.
    pub fn from_side_a(
        effect_universe: &[usize],
        cause_universe: &[usize],
        effect_a: &[usize],
        cause_a: &[usize],
    ) -> Self {
        let effect_a = index_subset(effect_a.iter().copied());
        let cause_a = index_subset(cause_a.iter().copied());
        Self {
            effect_b: complement(effect_universe, &effect_a),
            cause_b: complement(cause_universe, &cause_a),
            effect_a,
            cause_a,
        }
    }

    /// `(effects, causes)` of side A then side B.
    pub fn sides(&self) -> [(&IndexSubset, &IndexSubset); 2] {
        [
            (&self.effect_a, &self.cause_a),
            (&self.effect_b, &self.cause_b),
        ]
    }

    /// Neither side is entirely empty.
    pub fn is_valid(&self) -> bool {
        self.sides()
            .iter()
            .all(|(effects, causes)| !effects.is_empty() || !causes.is_empty())
    }
}

/// Node-id form of a cut: the two connected components left after removing
/// the cut edges. Both sides empty means the heuristic found no cut.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodePartition {
    pub side_a: Vec<String>,
    pub side_b: Vec<String>,
}

impl NodePartition {
    pub fn new(side_a: Vec<String>, side_b: Vec<String>) -> Self {
        Self { side_a, side_b }
    }

    /// The explicit "no cut found" signal.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.side_a.is_empty() && self.side_b.is_empty()
    }

    pub fn contains(&self, node_id: &str) -> bool {
        self.side_a.iter().chain(&self.side_b).any(|n| n == node_id)
    }
}

/// Partition as returned in a result record. The shape depends on the
/// strategy that produced it, so callers branch on the variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PartitionOutcome {
    Indices(Partition),
    Nodes(NodePartition),
}

impl PartitionOutcome {
    pub fn as_indices(&self) -> Option<&Partition> {
        match self {
            Self::Indices(p) => Some(p),
            Self::Nodes(_) => None,
        }
    }

    pub fn as_nodes(&self) -> Option<&NodePartition> {
        match self {
            Self::Nodes(p) => Some(p),
            Self::Indices(_) => None,
        }
    }

    /// True only for an empty node partition.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Nodes(p) if p.is_empty())
    }
}
