//! Logging setup for the Scoreroom binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// The filter covers the calling crate and the binary itself. `RUST_LOG`
/// takes precedence over `default_log_level` when it is set.
///
/// # Arguments
///
/// * `crate_name` - The library crate of the binary (e.g., "scoreroom_server")
/// * `binary_name` - The name of the binary (e.g., "scoreroom-server")
/// * `default_log_level` - The default log level (e.g., "debug", "info")
///
/// # Examples
///
/// ```no_run
/// use scoreroom_shared::logger::setup_logger;
///
/// setup_logger("scoreroom_server", "scoreroom-server", "debug");
/// ```
pub fn setup_logger(crate_name: &str, binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(crate_name, binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build the default `EnvFilter` directive string.
///
/// Binary names use dashes while tracing targets use underscores, so both
/// names are normalized.
fn default_filter(crate_name: &str, binary_name: &str, level: &str) -> String {
    format!(
        "{}={},{}={},scoreroom_shared={},tower_http={}",
        crate_name.replace('-', "_"),
        level,
        binary_name.replace('-', "_"),
        level,
        level,
        level
    )
}
