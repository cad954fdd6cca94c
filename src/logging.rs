//! Tracing subscriber bootstrap
//!
//! Diagnostics go to stderr so they never mix with command output on stdout.
//! The filter comes from `USERCAT_LOG` when set, otherwise from the settings
//! file.

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LogFormat;
use crate::error::CatalogError;

/// Environment variable holding a tracing filter directive
pub const LOG_ENV: &str = "USERCAT_LOG";

/// Resolve the filter: environment first, then `level`, then `warn`
pub fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install the global subscriber
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(level: &str, format: LogFormat) -> Result<(), CatalogError> {
    let subscriber = fmt()
        .with_env_filter(build_filter(level))
        .with_target(false)
        .with_writer(std::io::stderr);

    let result = match format {
        LogFormat::Json => subscriber.json().try_init(),
        LogFormat::Text => subscriber.try_init(),
    };

    result.map_err(|e| CatalogError::Config(format!("Failed to initialize logging: {}", e)))
}
