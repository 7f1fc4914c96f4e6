//! Logging setup.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install a global subscriber at `level`; `RUST_LOG` takes precedence.
///
/// Calling this more than once keeps the first subscriber.
pub fn setup_logging(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    let installed = if json {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry.with(fmt::layer().pretty()).try_init()
    };

    if installed.is_err() {
        tracing::debug!("Global subscriber already installed");
    }
}
