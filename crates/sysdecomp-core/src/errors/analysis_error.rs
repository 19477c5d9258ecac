//! Top-level error aggregating every subsystem error via `From`.

use super::error_code::ErrorCode;
use super::{ConfigError, GraphError, SearchError, TensorError};

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Tensor error: {0}")]
    Tensor(#[from] TensorError),

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Search error: {0}")]
    Search(#[from] SearchError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ErrorCode for AnalysisError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Tensor(e) => e.error_code(),
            Self::Graph(e) => e.error_code(),
            Self::Search(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}

pub type EngineResult<T> = Result<T, AnalysisError>;
