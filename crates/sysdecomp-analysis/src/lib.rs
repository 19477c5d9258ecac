//! # sysdecomp-analysis
//!
//! Partition-distance search over binary transition systems: the tensor
//! kernel, per-request memo, distance metrics, the cause/effect graph with
//! bipartite coloring, partition enumeration, and the exact and edge-cut
//! searches with their fallbacks.

pub mod distance;
pub mod distribution;
pub mod engine;
pub mod graph;
pub mod memo;
pub mod partitions;
pub mod search;
pub mod tensor;

pub use distance::{emd, hamming_emd, DistanceMetric};
pub use distribution::DistributionBuilder;
pub use engine::PartitionEngine;
pub use memo::{Memo, MemoScope};
