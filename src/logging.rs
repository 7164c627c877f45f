//! Structured logging setup using `tracing-subscriber`.

use tracing_subscriber::EnvFilter;

/// Initialise logging for the one-shot CLI run.
///
/// Emits human-readable output to stderr, controlled by `RUST_LOG`
/// (default: `info`). Keeps stdout free for the interactive prompt and the
/// confirmation line.
pub fn init_cli() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
