//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::{DEFAULT_LOG_FILTER, LOG_ENV};

static INIT: Once = Once::new();

/// Initialize sysdecomp logging.
///
/// Reads `SYSDECOMP_LOG` for per-module log levels.
/// Format: `SYSDECOMP_LOG=sysdecomp_analysis::search=debug,sysdecomp_analysis::tensor=trace`
///
/// Search spans record their counters when they finish, so span close events
/// are written too. Idempotent; a subscriber installed elsewhere first is
/// left in place.
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .with(env_filter())
            .try_init();
    });
}

/// Filter from `SYSDECOMP_LOG`, or [`DEFAULT_LOG_FILTER`] when it is unset
/// or does not parse.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}
