/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "SYSDECOMP_LOG";

/// Log directives used when `SYSDECOMP_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "sysdecomp_core=info,sysdecomp_analysis=info";

/// Edge weight of a cause→effect link that has not been scored yet.
pub const INFINITE_WEIGHT: f64 = f64::INFINITY;

/// Edge weight marking a removed link. Zero-weight edges count as absent
/// when coloring with zero-weight exclusion.
pub const REMOVED_WEIGHT: f64 = 0.0;

/// Two-color palette written as node background annotations by the coloring pass.
pub const COLORING_PALETTE: [&str; 2] = ["#cfe2f3", "#ffd28b"];

/// Default upper bound on `effects + causes` for which `auto` picks exact search.
pub const DEFAULT_EXACT_MAX_VARIABLES: usize = 8;

/// Ant colony defaults.
pub const DEFAULT_ANTS_PER_NODE: usize = 2;
pub const DEFAULT_N_BEST: usize = 2;
pub const DEFAULT_COLONY_ITERATIONS: usize = 100;
pub const DEFAULT_COLONY_DECAY: f64 = 0.85;
pub const DEFAULT_COLONY_ALPHA: f64 = -1.0;
pub const DEFAULT_COLONY_BETA: f64 = 1.0;
