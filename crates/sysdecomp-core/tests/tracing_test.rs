//! Tests for tracing setup.

use std::sync::Mutex;

use sysdecomp_core::constants::LOG_ENV;
use sysdecomp_core::tracing::{env_filter, init_tracing};

static TRACING_MUTEX: Mutex<()> = Mutex::new(());

#[test]
fn test_init_tracing_is_idempotent() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    init_tracing();
    init_tracing();
    tracing::info!(target: "sysdecomp_core", "still logging");
}

#[test]
fn test_unset_env_uses_per_crate_defaults() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::remove_var(LOG_ENV);
    let filter = env_filter().to_string();
    assert!(filter.contains("sysdecomp_core=info"), "{filter}");
    assert!(filter.contains("sysdecomp_analysis=info"), "{filter}");
}

#[test]
fn test_env_directives_replace_defaults() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var(LOG_ENV, "sysdecomp_analysis::search=debug");
    let filter = env_filter().to_string();
    std::env::remove_var(LOG_ENV);
    assert!(filter.contains("sysdecomp_analysis::search=debug"), "{filter}");
    assert!(!filter.contains("sysdecomp_core"), "{filter}");
}
