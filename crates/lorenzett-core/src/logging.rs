//! Log subscriber setup for configuration drivers.

use tracing_subscriber::EnvFilter;

use crate::config::env_vars;

/// Default filter when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "lorenzett_core=info";

const VERBOSE_FILTER: &str = "lorenzett_core=debug";

/// Install a global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over `verbose`. Setting `LORENZETT_LOG_JSON=true`
/// switches to JSON lines. Calling this again after a subscriber is installed
/// does nothing.
pub fn init(verbose: bool) {
    let json_logging = std::env::var(env_vars::LOG_JSON)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(false);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new(VERBOSE_FILTER)
        } else {
            EnvFilter::new(DEFAULT_FILTER)
        }
    });

    let result = if json_logging {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .compact()
            .try_init()
    };

    if result.is_err() {
        tracing::debug!("Global subscriber already installed");
    }
}
