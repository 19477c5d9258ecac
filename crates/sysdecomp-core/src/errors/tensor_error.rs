//! Tensor algebra errors.

use super::error_code::{self, ErrorCode};

/// Errors raised by matrix construction and tensor operations.
///
/// Only shape problems are errors. NaN and infinity flow through the
/// arithmetic untouched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TensorError {
    #[error("invalid matrix shape {rows}x{columns}: {reason}")]
    InvalidMatrixShape {
        rows: usize,
        columns: usize,
        reason: String,
    },

    #[error("invalid binary distribution {value:?}: {reason}")]
    InvalidDistribution { value: String, reason: String },

    #[error("dimension mismatch in {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        expected: usize,
        actual: usize,
        context: String,
    },

    #[error("index {index} out of range (bound {bound}) in {context}")]
    IndexOutOfRange {
        index: usize,
        bound: usize,
        context: String,
    },
}

impl ErrorCode for TensorError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidMatrixShape { .. } => error_code::INVALID_MATRIX_SHAPE,
            Self::InvalidDistribution { .. } => error_code::INVALID_DISTRIBUTION,
            Self::DimensionMismatch { .. } => error_code::DIMENSION_MISMATCH,
            Self::IndexOutOfRange { .. } => error_code::INDEX_OUT_OF_RANGE,
        }
    }
}

pub type TensorResult<T> = Result<T, TensorError>;
