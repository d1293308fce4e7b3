//! Tracing subscriber setup.
//!
//! Logs go to stderr so they never interleave with prompts on stdout. The
//! filter comes from `RUST_LOG` and defaults to `warn`.

use tracing_subscriber::EnvFilter;

use crate::config::Format;

const DEFAULT_FILTER: &str = "warn";

/// Installs the global subscriber. Call once, before the first log line.
pub fn init(format: Format) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        Format::Json => builder.json().init(),
        Format::Text => builder.init(),
    }
}
