//! Log output.

use parley_foundation::{Error, Result};
use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber, writing to stderr.
///
/// `RUST_LOG` wins over `default_filter` when it is set.
///
/// # Errors
///
/// Returns an internal error if the filter is malformed or a subscriber is
/// already installed.
pub fn init(default_filter: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .map_err(|e| Error::internal(format!("invalid log filter '{default_filter}': {e}")))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| Error::internal(format!("failed to install logger: {e}")))
}
