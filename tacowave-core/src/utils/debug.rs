use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber, writing to stderr.
///
/// Defaults to `INFO`, or `DEBUG` when `TACOWAVE_DEBUG` contains `1`. `RUST_LOG`
/// directives take precedence. Does nothing if a subscriber is already set.
pub fn initialize_logging() {
    let is_debug = std::env::var("TACOWAVE_DEBUG")
        .unwrap_or_default()
        .contains('1');

    let filter = EnvFilter::builder()
        .with_default_directive(if is_debug {
            LevelFilter::DEBUG.into()
        } else {
            LevelFilter::INFO.into()
        })
        .from_env_lossy();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
