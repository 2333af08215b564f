//! Diagnostic logging setup
//!
//! Diagnostics go to stderr so they never mix with the report on stdout.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Default log level for a run
pub fn default_level(verbose: bool) -> Level {
    if verbose {
        Level::INFO
    } else {
        Level::WARN
    }
}

/// Initialise the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the level derived from `verbose`.
/// Only the first call in a process takes effect.
pub fn init_tracing(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbose).as_str()));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .ok();
}
