//! Development-time tracing for the honeydew CLI.
//!
//! Diagnostics go to stderr and never interleave with subprocess output
//! semantics: git stderr is inherited directly by the child processes and
//! does not pass through this layer.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` overrides everything. Otherwise verbose runs default to
/// `honeydew=info` and quiet runs to `warn`. Output: stderr, compact format.
pub fn init(verbose: bool) {
    let default = if verbose { "honeydew=info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
