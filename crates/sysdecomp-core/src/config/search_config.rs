//! Search strategy configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_EXACT_MAX_VARIABLES;
use crate::errors::ConfigError;

/// How the engine picks a search family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    /// Exact search for small systems, edge-cut heuristics beyond.
    #[default]
    Auto,
    Exact,
    Heuristic,
}

impl FromStr for SearchStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "exact" => Ok(Self::Exact),
            "heuristic" => Ok(Self::Heuristic),
            other => Err(ConfigError::InvalidValue {
                field: "search.strategy".to_string(),
                message: format!("unknown strategy {other:?}"),
            }),
        }
    }
}

/// Distributional distance used to score partitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// Signed prefix-difference transport cost.
    #[default]
    Prefix,
    /// Greedy transport weighted by Hamming distance between states.
    Hamming,
}

impl FromStr for MetricKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prefix" => Ok(Self::Prefix),
            "hamming" => Ok(Self::Hamming),
            other => Err(ConfigError::InvalidValue {
                field: "search.metric".to_string(),
                message: format!("unknown metric {other:?}"),
            }),
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Prefix => "prefix",
            Self::Hamming => "hamming",
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Strategy selection. Default: auto.
    pub strategy: Option<SearchStrategy>,
    /// Largest `effects + causes` handled exactly under `auto`. Default: 8.
    pub exact_max_variables: Option<usize>,
    /// Distance metric. Default: prefix.
    pub metric: Option<MetricKind>,
}

impl SearchConfig {
    pub fn effective_strategy(&self) -> SearchStrategy {
        self.strategy.unwrap_or_default()
    }

    pub fn effective_exact_max_variables(&self) -> usize {
        self.exact_max_variables
            .unwrap_or(DEFAULT_EXACT_MAX_VARIABLES)
    }

    pub fn effective_metric(&self) -> MetricKind {
        self.metric.unwrap_or_default()
    }
}
