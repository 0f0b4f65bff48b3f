//! Tracing subscriber setup for the server binary

use anyhow::{Context, Result};
use ba_shared::config::{LogFormat, LoggingConfig};
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

/// Install the global subscriber described by `config`
///
/// `RUST_LOG` takes precedence over `config.level` when set.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .with_context(|| format!("invalid log filter '{}'", config.level))?;

    let base = fmt::layer()
        .with_file(config.source_location)
        .with_line_number(config.source_location)
        .with_target(true);

    let subscriber = Registry::default().with(filter);

    match config.format {
        LogFormat::Json => {
            tracing::subscriber::set_global_default(subscriber.with(base.json()))
        }
        LogFormat::Pretty => {
            tracing::subscriber::set_global_default(subscriber.with(base.pretty()))
        }
        LogFormat::Compact => {
            tracing::subscriber::set_global_default(subscriber.with(base.compact()))
        }
    }
    .context("failed to install tracing subscriber")
}
