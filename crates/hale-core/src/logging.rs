//! Tracing bootstrap for hosting applications.

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence; `fallback_level` (typically
/// `general.log_level` from the config) applies otherwise. Calling this
/// more than once is harmless; later calls are no-ops.
pub fn init(fallback_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(fallback_level.to_string()));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
