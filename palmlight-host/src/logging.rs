//! Logging setup

use tracing_subscriber::EnvFilter;

/// Level used when neither `--log-level` nor `RUST_LOG` is set
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Build the filter
///
/// An explicit level wins over `RUST_LOG`.
fn build_filter(log_level: Option<&str>) -> EnvFilter {
    match log_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL)),
    }
}

/// Initialize the global subscriber
pub fn init_logging(log_level: Option<&str>) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(log_level))
        .with_thread_names(true)
        .with_target(false)
        .try_init();
}
