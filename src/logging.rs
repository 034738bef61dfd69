use tracing_subscriber::{fmt, EnvFilter};

/// Initializes console logging on stderr.
///
/// Verbosity follows `RUST_LOG`, defaulting to `fieldmap_clean=info`.
pub fn init_logging() {
    let env = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("fieldmap_clean=info"));

    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
