//! Tracing initialization

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level when set. Output
/// goes to stderr so stdout stays clean for command output.
pub fn init_tracing(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let result = match config.format.as_str() {
        "json" => builder.json().try_init(),
        "compact" => builder.compact().try_init(),
        _ => builder.pretty().try_init(),
    };

    result.map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))
}
