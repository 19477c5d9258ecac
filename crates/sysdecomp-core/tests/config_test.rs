//! Tests for layered configuration.

use std::sync::Mutex;

use sysdecomp_core::config::{ConfigOverrides, MetricKind, SearchStrategy};
use sysdecomp_core::errors::ConfigError;
use sysdecomp_core::SysdecompConfig;

/// Serializes tests that touch process environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const ENV_KEYS: [&str; 6] = [
    "SYSDECOMP_SEARCH_STRATEGY",
    "SYSDECOMP_SEARCH_EXACT_MAX_VARIABLES",
    "SYSDECOMP_SEARCH_METRIC",
    "SYSDECOMP_COLONY_ITERATIONS",
    "SYSDECOMP_COLONY_SEED",
    "SYSDECOMP_COLONY_DECAY",
];

fn clear_env() {
    for key in ENV_KEYS {
        std::env::remove_var(key);
    }
}

/// Project root with an optional `sysdecomp.toml`; HOME points inside it so
/// no real user config leaks in.
fn project(toml: Option<&str>) -> tempfile::TempDir {
    let dir = tempfile::TempDir::new().unwrap();
    std::env::set_var("HOME", dir.path().join("home"));
    if let Some(content) = toml {
        std::fs::write(dir.path().join("sysdecomp.toml"), content).unwrap();
    }
    dir
}

#[test]
fn test_defaults_without_files() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let dir = project(None);

    let config = SysdecompConfig::load(dir.path(), None).unwrap();
    assert_eq!(config, SysdecompConfig::default());
    assert_eq!(config.search.effective_strategy(), SearchStrategy::Auto);
    assert_eq!(config.search.effective_exact_max_variables(), 8);
    assert_eq!(config.search.effective_metric(), MetricKind::Prefix);
    assert_eq!(config.colony.effective_iterations(), 100);
    assert_eq!(config.colony.effective_decay(), 0.85);
    assert_eq!(config.colony.seed, None);
}

#[test]
fn test_override_beats_env_beats_project() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let dir = project(Some(
        r#"
[search]
strategy = "exact"
exact_max_variables = 6

[colony]
iterations = 20
seed = 1
"#,
    ));
    std::env::set_var("SYSDECOMP_COLONY_ITERATIONS", "30");
    std::env::set_var("SYSDECOMP_SEARCH_STRATEGY", "auto");

    let overrides = ConfigOverrides {
        strategy: Some(SearchStrategy::Heuristic),
        ..Default::default()
    };
    let config = SysdecompConfig::load(dir.path(), Some(&overrides)).unwrap();
    clear_env();

    assert_eq!(config.search.strategy, Some(SearchStrategy::Heuristic));
    assert_eq!(config.colony.iterations, Some(30));
    assert_eq!(config.search.exact_max_variables, Some(6));
    assert_eq!(config.colony.seed, Some(1));
}

#[test]
fn test_user_config_below_project() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let dir = project(Some("[colony]\nseed = 9\n"));
    let user_dir = dir.path().join("home").join(".sysdecomp");
    std::fs::create_dir_all(&user_dir).unwrap();
    std::fs::write(
        user_dir.join("config.toml"),
        "[colony]\nseed = 3\nn_best = 4\n",
    )
    .unwrap();

    let config = SysdecompConfig::load(dir.path(), None).unwrap();
    assert_eq!(config.colony.seed, Some(9));
    assert_eq!(config.colony.n_best, Some(4));
}

#[test]
fn test_unparseable_env_value_is_skipped() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let dir = project(None);
    std::env::set_var("SYSDECOMP_COLONY_SEED", "not-a-number");
    std::env::set_var("SYSDECOMP_SEARCH_METRIC", "Hamming");

    let config = SysdecompConfig::load(dir.path(), None).unwrap();
    clear_env();
    assert_eq!(config.colony.seed, None);
    assert_eq!(config.search.metric, Some(MetricKind::Hamming));
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let dir = project(Some("this is not toml {{{{"));

    match SysdecompConfig::load(dir.path(), None) {
        Err(ConfigError::ParseError { .. }) => {}
        other => panic!("expected ParseError, got {other:?}"),
    }
}

#[test]
fn test_out_of_range_values_fail_validation() {
    for (toml, field) in [
        ("[colony]\ndecay = 0.0\n", "colony.decay"),
        ("[colony]\ndecay = 1.5\n", "colony.decay"),
        ("[colony]\niterations = 0\n", "colony.iterations"),
        ("[colony]\nants_per_node = 0\n", "colony.ants_per_node"),
        ("[colony]\nalpha = inf\n", "colony.alpha"),
    ] {
        match SysdecompConfig::from_toml(toml) {
            Err(ConfigError::ValidationFailed { field: f, .. }) => assert_eq!(f, field),
            other => panic!("expected ValidationFailed for {toml:?}, got {other:?}"),
        }
    }
}

#[test]
fn test_unknown_strategy_is_rejected() {
    assert!("greedy".parse::<SearchStrategy>().is_err());
    assert_eq!(" Exact ".parse::<SearchStrategy>().unwrap(), SearchStrategy::Exact);
    assert!(SysdecompConfig::from_toml("[search]\nstrategy = \"greedy\"\n").is_err());
}

#[test]
fn test_toml_round_trip() {
    let mut config = SysdecompConfig::default();
    config.apply_overrides(&ConfigOverrides {
        metric: Some(MetricKind::Hamming),
        colony_seed: Some(42),
        colony_iterations: Some(7),
        ..Default::default()
    });
    let text = config.to_toml().unwrap();
    assert_eq!(SysdecompConfig::from_toml(&text).unwrap(), config);
}
