//! Tracing setup shared by the `bmi` binary and the core's tests.
//!
//! Everything is written to stderr; stdout belongs to the command output
//! (tables, gauge, CSV paths) that users and scripts read.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the subscriber at `warn`, so a normal `bmi calc` prints nothing
/// but its result. Set `RUST_LOG=bmi_core=debug` to trace store access.
pub fn init() {
    init_with_level("warn")
}

/// Install the subscriber with `default_level` as the filter.
///
/// `RUST_LOG`, when set and parseable, wins over `default_level`.
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

/// Debug-level output routed through the test harness, safe to call from
/// several tests
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}
