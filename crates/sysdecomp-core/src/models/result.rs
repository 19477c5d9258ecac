//! Result record handed back to the service layer.

use serde::{Deserialize, Serialize};

use super::partition::PartitionOutcome;

/// Which search produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Exhaustive enumeration of every partition.
    Exact,
    /// Direct edge-cut step found a finite 2-component cut.
    EdgeCut,
    /// Heatmap boundary sweep over the cost matrix.
    HeatmapSweep,
    /// Ant colony pheromone ranking.
    AntColony,
}

impl Strategy {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::EdgeCut => "edge_cut",
            Self::HeatmapSweep => "heatmap_sweep",
            Self::AntColony => "ant_colony",
        }
    }
}

/// Counters gathered while searching.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    pub partitions_evaluated: usize,
    pub memo_hits: usize,
    pub memo_misses: usize,
    pub edges_evaluated: usize,
    pub edges_removed: usize,
    pub colony_iterations: usize,
    pub elapsed_ms: u64,
}

/// `{ binaryDistribution, partition, distance, stats }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub binary_distribution: String,
    pub strategy: Strategy,
    pub partition: PartitionOutcome,
    /// Distance of the winning partition. Infinite when no cut was found.
    pub distance: f64,
    pub stats: SearchStats,
}

impl AnalysisResult {
    /// No usable partition: an empty node partition from the heuristics.
    pub fn is_empty(&self) -> bool {
        self.partition.is_empty()
    }
}
