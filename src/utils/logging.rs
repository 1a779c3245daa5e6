//! Structured logging setup.
//!
//! The library itself only emits `tracing` events. Applications that want them
//! printed call [`init_logging`] once at startup.

use crate::config::LoggingConfig;
use crate::error::constants::ERR_LOGGING_INIT;
use crate::error::{CodecError, Result};
use tracing::info;
use tracing_subscriber::fmt;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
pub fn default_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::new(config.log_level.to_string().to_lowercase())
}

/// Install a global fmt subscriber.
///
/// `RUST_LOG` overrides the configured level. Fails if a global subscriber is
/// already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(config));
    let builder = fmt().with_env_filter(filter).with_target(true);

    let installed = if config.json_format {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| CodecError::Config(format!("{ERR_LOGGING_INIT}: {e}")))?;

    info!(
        app = %config.app_name,
        level = %config.log_level,
        json = config.json_format,
        "logging initialized"
    );
    Ok(())
}
