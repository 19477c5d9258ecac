//! Data model shared by the tensor kernel, the graph layer, and the searches.

pub mod distribution;
pub mod matrix;
pub mod partition;
pub mod result;

pub use distribution::BinaryDistribution;
pub use matrix::TransitionMatrix;
pub use partition::{NodePartition, Partition, PartitionOutcome};
pub use result::{AnalysisResult, SearchStats, Strategy};
