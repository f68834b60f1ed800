//! Tracing setup shared by the fitlog binaries.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing at the default `info` level.
///
/// `RUST_LOG` overrides the default filter as usual.
pub fn init() {
    init_with_level("info")
}

/// Initialize tracing with the given default level (debug, info, warn, error)
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}
