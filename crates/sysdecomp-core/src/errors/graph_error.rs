//! Adjacency graph and coloring errors.

use super::error_code::{self, ErrorCode};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// Two adjacent nodes received the same color.
    #[error("graph is not bipartite: conflict at node {node_id}")]
    NotBipartite { node_id: String },

    #[error("node not found: {node_id}")]
    NodeNotFound { node_id: String },

    #[error("edge not found: {from} -> {to}")]
    EdgeNotFound { from: String, to: String },
}

impl ErrorCode for GraphError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotBipartite { .. } => error_code::NOT_BIPARTITE,
            Self::NodeNotFound { .. } => error_code::NODE_NOT_FOUND,
            Self::EdgeNotFound { .. } => error_code::EDGE_NOT_FOUND,
        }
    }
}

pub type GraphResult<T> = Result<T, GraphError>;
