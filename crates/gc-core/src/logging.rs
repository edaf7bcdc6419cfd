//! Logging setup
//!
//! `RUST_LOG` takes precedence over the configured level.

use crate::config::LogLevel;
use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber.
///
/// Safe to call more than once; later calls are ignored.
pub fn init(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_filter()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
