use tracing_subscriber::EnvFilter;

/// Builds the run's subscriber. `-v` forces debug; otherwise `RUST_LOG` is
/// honoured and falls back to info.
pub fn subscriber(verbose: bool) -> impl tracing::Subscriber + Send + Sync + 'static {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish()
}
