//! Partition search errors.

use super::error_code::{self, ErrorCode};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The enumerator produced no candidate. Invariant violation for any
    /// system with at least two variables in one universe.
    #[error("no partition found for {effects} effects and {causes} causes")]
    NoPartitionFound { effects: usize, causes: usize },
}

impl ErrorCode for SearchError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NoPartitionFound { .. } => error_code::NO_PARTITION_FOUND,
        }
    }
}
