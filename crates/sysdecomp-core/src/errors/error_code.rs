//! ErrorCode trait for structured error reporting at the service boundary.

/// Every error enum implements this to expose a stable, machine-readable
/// code string next to its human-readable message.
pub trait ErrorCode {
    /// Returns the error code string (e.g., "INVALID_MATRIX_SHAPE").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted boundary string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const INVALID_MATRIX_SHAPE: &str = "INVALID_MATRIX_SHAPE";
pub const INVALID_DISTRIBUTION: &str = "INVALID_DISTRIBUTION";
pub const DIMENSION_MISMATCH: &str = "DIMENSION_MISMATCH";
pub const INDEX_OUT_OF_RANGE: &str = "INDEX_OUT_OF_RANGE";
pub const NOT_BIPARTITE: &str = "NOT_BIPARTITE";
pub const NODE_NOT_FOUND: &str = "NODE_NOT_FOUND";
pub const EDGE_NOT_FOUND: &str = "EDGE_NOT_FOUND";
pub const NO_PARTITION_FOUND: &str = "NO_PARTITION_FOUND";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
