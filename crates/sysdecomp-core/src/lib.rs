//! # sysdecomp-core
//!
//! Foundation crate for the sysdecomp partition-distance engine.
//! Defines the data model, errors, config, tracing setup, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod tracing;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::SysdecompConfig;
pub use errors::{AnalysisError, EngineResult};
pub use models::{
    AnalysisResult, BinaryDistribution, NodePartition, Partition, PartitionOutcome, SearchStats,
    Strategy, TransitionMatrix,
};
pub use types::IndexSubset;
