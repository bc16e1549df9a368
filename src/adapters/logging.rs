//! Host log backend.
//!
//! Installs a `tracing-subscriber` formatter on stderr; stdout carries the
//! JSON output stream.  Records from the `log` facade used throughout the
//! crate are bridged into it.  `FUZZYDRIVE_LOG` takes an `EnvFilter`
//! directive (`debug`, `fuzzydrive::control=trace`, ...) and defaults to
//! `info`.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

pub const LEVEL_ENV: &str = "FUZZYDRIVE_LOG";

const DEFAULT_DIRECTIVE: &str = "info";

/// Filter for a directive string; unset or unparsable falls back to
/// `info`.
pub fn filter(directive: Option<&str>) -> EnvFilter {
    directive
        .and_then(|d| EnvFilter::try_new(d.trim()).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Install the subscriber and the `log` bridge.  Fails if a global
/// subscriber or logger is already set.
pub fn init() -> Result<(), TryInitError> {
    let directive = std::env::var(LEVEL_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(filter(directive.as_deref()))
        .with_writer(std::io::stderr)
        .finish()
        .try_init()
}
