//! Logging setup.
//!
//! Log output goes to stderr so stdout stays free for whatever embeds the
//! library. `RUST_LOG` takes precedence over the configured level.

use crate::config::Config;
use tracing_subscriber::EnvFilter;

/// Build the filter from `RUST_LOG`, falling back to `level`.
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Install the global fmt subscriber.
///
/// Returns `false` if a subscriber was already installed.
pub fn init_tracing(config: &Config) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(&config.log_level))
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
