//! Configuration system for sysdecomp.
//! TOML-based, layered resolution: overrides > env > project > user > defaults.

pub mod colony_config;
pub mod search_config;
pub mod sysdecomp_config;

pub use colony_config::ColonyConfig;
pub use search_config::{MetricKind, SearchConfig, SearchStrategy};
pub use sysdecomp_config::{ConfigOverrides, SysdecompConfig};
