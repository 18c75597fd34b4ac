//! Diagnostic logging setup.

use tracing_subscriber::EnvFilter;

/// Installs a stderr `tracing` subscriber.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` enables `debug` for the parser and the
/// CLI. Without either, no subscriber is installed and parser events are discarded.
pub fn init(verbose: bool) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(directives) if !directives.is_empty() => EnvFilter::new(directives),
        _ if verbose => EnvFilter::new("riffwave=debug,riffwave_cli=debug"),
        _ => return,
    };

    // A subscriber may already be installed by an embedding application.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
