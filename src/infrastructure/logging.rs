//! Logging setup.
//!
//! Installed before configuration is loaded, so configuration warnings
//! are not lost. `DEBUG` (any value) raises the level to debug.

use tracing_subscriber::fmt::format::FmtSpan;

/// Whether debug logging was requested through the environment.
pub fn debug_requested() -> bool {
    std::env::var_os("DEBUG").is_some()
}

/// Install the global fmt subscriber.
#[cfg_attr(coverage_nightly, coverage(off))]
pub fn init_logging(debug: bool) {
    let log_level = if debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_span_events(FmtSpan::CLOSE)
        .init();
}
