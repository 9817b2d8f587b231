//! Logging initialisation.

use crate::config::LoggingSettings;
use reelwriter_error::{ConfigError, ReelwriterResult};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set. Otherwise `--verbose` selects `debug` and the
/// configured level applies. Logs go to stderr so stdout stays clean JSON.
pub fn init_tracing(settings: &LoggingSettings, verbose: bool) -> ReelwriterResult<()> {
    let fallback = if verbose { "debug" } else { settings.level().as_str() };
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(fallback).map_err(|e| {
            ConfigError::invalid(
                "logging.level",
                format!("'{fallback}' is not a valid filter: {e}"),
            )
        })?,
    };

    let registry = tracing_subscriber::registry().with(env_filter);
    let installed = if *settings.json() {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init()
    };
    installed.map_err(|e| ConfigError::new(format!("Failed to initialise logging: {e}")))?;
    Ok(())
}
