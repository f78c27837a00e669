use std::env;

use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` controls the filter (default `info`); `LOG_FORMAT=json` emits
/// one JSON object per event instead of the human-readable format.
pub fn configure_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let result = if env::var("LOG_FORMAT").is_ok_and(|format| format == "json") {
        subscriber.json().try_init()
    } else {
        subscriber.compact().try_init()
    };

    if let Err(e) = result {
        warn!("logging already initialized: {e}");
    }
}
