//! Post-merge configuration validation.
//!
//! Validates that deserialized [`Config`](crate::Config) values are within
//! acceptable ranges.

use crate::error::{ConfigError, ConfigResult};
use crate::types::Config;

/// Accepted log levels.
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Accepted log formats.
pub const LOG_FORMATS: [&str; 4] = ["pretty", "compact", "json", "full"];

/// Accepted log file rotations.
pub const LOG_ROTATIONS: [&str; 3] = ["never", "hourly", "daily"];

/// Upper bound for `limits.max_document_bytes` (1 GiB).
const MAX_DOCUMENT_BYTES_UPPER_BOUND: u64 = 1_073_741_824;

/// Upper bound for `signing.wrap_width`.
const WRAP_WIDTH_UPPER_BOUND: usize = 1024;

/// Validate a fully-merged and deserialized configuration.
///
/// # Errors
///
/// Returns the first validation error found.
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_logging(config)?;
    validate_limits(config)?;
    validate_signing(config)?;
    Ok(())
}

fn one_of(field: &str, value: &str, allowed: &[&str]) -> ConfigResult<()> {
    if allowed.contains(&value) {
        return Ok(());
    }
    Err(ConfigError::ValidationError {
        field: field.to_owned(),
        message: format!(
            "unsupported value '{value}'; expected one of: {}",
            allowed.join(", ")
        ),
    })
}

fn validate_logging(config: &Config) -> ConfigResult<()> {
    let logging = &config.logging;
    one_of("logging.level", &logging.level, &LOG_LEVELS)?;
    one_of("logging.format", &logging.format, &LOG_FORMATS)?;
    one_of("logging.rotation", &logging.rotation, &LOG_ROTATIONS)?;

    if logging.directives.iter().any(|d| d.trim().is_empty()) {
        return Err(ConfigError::ValidationError {
            field: "logging.directives".to_owned(),
            message: "directives must not be empty strings".to_owned(),
        });
    }
    Ok(())
}

fn validate_limits(config: &Config) -> ConfigResult<()> {
    let max = config.limits.max_document_bytes;
    if max == 0 || max > MAX_DOCUMENT_BYTES_UPPER_BOUND {
        return Err(ConfigError::ValidationError {
            field: "limits.max_document_bytes".to_owned(),
            message: format!("must be between 1 and {MAX_DOCUMENT_BYTES_UPPER_BOUND}"),
        });
    }
    Ok(())
}

fn validate_signing(config: &Config) -> ConfigResult<()> {
    let width = config.signing.wrap_width;
    // Base64 works in 4-character groups.
    if width > WRAP_WIDTH_UPPER_BOUND || width % 4 != 0 {
        return Err(ConfigError::ValidationError {
            field: "signing.wrap_width".to_owned(),
            message: format!(
                "wrap_width {width} must be a multiple of 4 no larger than {WRAP_WIDTH_UPPER_BOUND} (0 disables wrapping)"
            ),
        });
    }
    Ok(())
}
