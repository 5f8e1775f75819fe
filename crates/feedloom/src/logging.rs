//! Logging setup.
//!
//! Logs go to stderr so they never mix with a feed printed on stdout.

use tracing_subscriber::EnvFilter;

use crate::error::{FeedError, Result};

/// Build the filter for `level`.
///
/// With `prefer_level` set, `level` wins and `RUST_LOG` is only consulted if
/// `level` does not parse. Otherwise `RUST_LOG` wins when it is set.
pub fn filter(level: &str, prefer_level: bool) -> Result<EnvFilter> {
    let from_level = || {
        EnvFilter::try_new(level)
            .map_err(|e| FeedError::Config(format!("invalid log level '{level}': {e}")))
    };

    if prefer_level {
        from_level().or_else(|level_err| {
            EnvFilter::try_from_default_env().map_err(|env_err| {
                FeedError::Config(format!("{level_err}; RUST_LOG: {env_err}"))
            })
        })
    } else {
        EnvFilter::try_from_default_env().or_else(|_| from_level())
    }
}

/// Install the global subscriber. Call once, before the first load.
pub fn init(level: &str, prefer_level: bool) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(filter(level, prefer_level)?)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| FeedError::Config(format!("failed to install subscriber: {e}")))
}
