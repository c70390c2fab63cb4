//! Tracing subscriber setup driven by [`LoggingConfig`]

use thiserror::Error;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{LogFormat, LoggingConfig};

/// Failure to install the global subscriber
#[derive(Error, Debug)]
#[error("Failed to initialize tracing: {0}")]
pub struct TelemetryError(String);

/// Install a global fmt subscriber. `RUST_LOG` takes precedence over the
/// configured level.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(config.source_location)
        .with_line_number(config.source_location);

    let result = match (config.format, config.timestamp) {
        (LogFormat::Json, _) => builder.json().try_init(),
        (LogFormat::Pretty, true) => builder.pretty().try_init(),
        (LogFormat::Pretty, false) => builder.pretty().without_time().try_init(),
        (LogFormat::Compact, true) => builder.compact().try_init(),
        (LogFormat::Compact, false) => builder.compact().without_time().try_init(),
    };

    result.map_err(|e| TelemetryError(e.to_string()))
}
