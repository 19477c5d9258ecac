//! Error handling for sysdecomp.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod analysis_error;
pub mod config_error;
pub mod error_code;
pub mod graph_error;
pub mod search_error;
pub mod tensor_error;

pub use analysis_error::{AnalysisError, EngineResult};
pub use config_error::ConfigError;
pub use error_code::ErrorCode;
pub use graph_error::{GraphError, GraphResult};
pub use search_error::SearchError;
pub use tensor_error::{TensorError, TensorResult};
