//! Partition searches: exhaustive for small systems, edge-cut heuristics
//! beyond.

pub mod colony;
pub mod cost_matrix;
pub mod edge_cut;
pub mod exact;
pub mod sweep;

pub use colony::{AntColony, ColonyOutcome, Tour};
pub use cost_matrix::CostMatrix;
pub use edge_cut::{CutCandidate, EdgeCutReport, EdgeCutSearch, EdgeRemoval};
pub use exact::{ExactOutcome, ExactSearch};
pub use sweep::{cut_cost, heatmap_sweep, partition_cut_cost};
