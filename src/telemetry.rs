use crate::config::{Config, LogFormat};
use tracing_subscriber::EnvFilter;

/// Installs the global fmt subscriber. Returns `false` when a subscriber was
/// already installed, which is normal for repeated calls in tests.
pub fn init_tracing(config: &Config) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match config.log_format {
        LogFormat::Json => builder.json().try_init().is_ok(),
        LogFormat::Text => builder.try_init().is_ok(),
    }
}
