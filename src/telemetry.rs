//! Logging setup shared by the server and the CLI.

use tracing_subscriber::EnvFilter;

/// Installs a global `tracing` subscriber writing to stderr.
///
/// `level` is an `EnvFilter` directive (`info`, `image_url_resolver=debug`, ...);
/// an unparseable directive falls back to `info`. `format` is `json` for
/// one JSON object per event, anything else for human-readable text.
///
/// Calling this more than once is harmless: later calls leave the first
/// subscriber in place.
pub fn init(level: &str, format: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let result = if format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
    };

    if result.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}
