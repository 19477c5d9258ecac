//! Top-level sysdecomp configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{ColonyConfig, MetricKind, SearchConfig, SearchStrategy};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Programmatic overrides (applied via `apply_overrides`)
/// 2. Environment variables (`SYSDECOMP_*`)
/// 3. Project config (`sysdecomp.toml` in the given root)
/// 4. User config (`~/.sysdecomp/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SysdecompConfig {
    pub search: SearchConfig,
    pub colony: ColonyConfig,
}

/// Caller-supplied overrides, typically mapped from request parameters.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub strategy: Option<SearchStrategy>,
    pub metric: Option<MetricKind>,
    pub colony_seed: Option<u64>,
    pub colony_iterations: Option<usize>,
}

impl SysdecompConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        ::tracing::warn!(
                            path = %user_config_path.display(),
                            error = %e,
                            "ignoring unreadable user config"
                        );
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join("sysdecomp.toml");
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): overrides
        if let Some(o) = overrides {
            config.apply_overrides(o);
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML string without touching the filesystem or environment.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(decay) = self.colony.decay {
            if !(decay > 0.0 && decay <= 1.0) {
                return Err(ConfigError::ValidationFailed {
                    field: "colony.decay".to_string(),
                    message: "must be in (0.0, 1.0]".to_string(),
                });
            }
        }
        if self.colony.iterations == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "colony.iterations".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if self.colony.n_best == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "colony.n_best".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if self.colony.ants_per_node == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "colony.ants_per_node".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        let exponents = [
            ("colony.alpha", self.colony.alpha),
            ("colony.beta", self.colony.beta),
        ];
        for (field, value) in exponents {
            if value.is_some_and(|v| !v.is_finite()) {
                return Err(ConfigError::ValidationFailed {
                    field: field.to_string(),
                    message: "must be finite".to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(v) = overrides.strategy {
            self.search.strategy = Some(v);
        }
        if let Some(v) = overrides.metric {
            self.search.metric = Some(v);
        }
        if let Some(v) = overrides.colony_seed {
            self.colony.seed = Some(v);
        }
        if let Some(v) = overrides.colony_iterations {
            self.colony.iterations = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }

    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".sysdecomp").join("config.toml"))
    }

    fn merge_toml_file(config: &mut Self, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        let file_config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        config.merge(&file_config);
        Ok(())
    }

    /// Values set in `other` win; unset values keep the current layer.
    fn merge(&mut self, other: &Self) {
        let s = &other.search;
        if s.strategy.is_some() {
            self.search.strategy = s.strategy;
        }
        if s.exact_max_variables.is_some() {
            self.search.exact_max_variables = s.exact_max_variables;
        }
        if s.metric.is_some() {
            self.search.metric = s.metric;
        }

        let c = &other.colony;
        if c.ants_per_node.is_some() {
            self.colony.ants_per_node = c.ants_per_node;
        }
        if c.n_best.is_some() {
            self.colony.n_best = c.n_best;
        }
        if c.iterations.is_some() {
            self.colony.iterations = c.iterations;
        }
        if c.decay.is_some() {
            self.colony.decay = c.decay;
        }
        if c.alpha.is_some() {
            self.colony.alpha = c.alpha;
        }
        if c.beta.is_some() {
            self.colony.beta = c.beta;
        }
        if c.seed.is_some() {
            self.colony.seed = c.seed;
        }
    }

    /// Pattern: `SYSDECOMP_SEARCH_STRATEGY`, `SYSDECOMP_COLONY_SEED`, etc.
    /// Unparseable values are skipped.
    fn apply_env_overrides(config: &mut Self) {
        if let Some(v) = env_parse::<SearchStrategy>("SYSDECOMP_SEARCH_STRATEGY") {
            config.search.strategy = Some(v);
        }
        if let Some(v) = env_parse::<usize>("SYSDECOMP_SEARCH_EXACT_MAX_VARIABLES") {
            config.search.exact_max_variables = Some(v);
        }
        if let Some(v) = env_parse::<MetricKind>("SYSDECOMP_SEARCH_METRIC") {
            config.search.metric = Some(v);
        }
        if let Some(v) = env_parse::<usize>("SYSDECOMP_COLONY_ITERATIONS") {
            config.colony.iterations = Some(v);
        }
        if let Some(v) = env_parse::<u64>("SYSDECOMP_COLONY_SEED") {
            config.colony.seed = Some(v);
        }
        if let Some(v) = env_parse::<f64>("SYSDECOMP_COLONY_DECAY") {
            config.colony.decay = Some(v);
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
