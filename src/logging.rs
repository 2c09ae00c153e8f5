//! Diagnostic logging for the binary
//!
//! Events go to stderr so they never mix with command output.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber
///
/// `RUST_LOG` wins when set; otherwise the level is `warn`, or `debug` with
/// `verbose`.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    // A second call (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init();
}
