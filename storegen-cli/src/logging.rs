use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "STOREGEN_LOG";

/// Initialise the global `tracing` subscriber, writing to stderr.
///
/// Respects `STOREGEN_LOG`. Falls back to `debug` when `verbose` is set and to
/// `warn` otherwise.
///
/// Call this once, at the very start of `main`, before any tracing macro.
pub fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
