//! `tracing` subscriber setup for the binary.

use tracing_subscriber::EnvFilter;

use crate::error::AppError;

/// Install the global subscriber. `RUST_LOG` takes precedence over `level`.
pub fn init(level: &str) -> Result<(), AppError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .map_err(|e| AppError::config(format!("Invalid log level '{level}': {e}")))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| AppError::config(format!("Failed to initialise logging: {e}")))
}
