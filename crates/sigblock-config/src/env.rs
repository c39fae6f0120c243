//! `SIGBLOCK_*` environment overrides.
//!
//! Environment variables are the highest-precedence layer and are applied to
//! the merged TOML tree before it is deserialized.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::merge::set_path;

/// Prefix shared by every recognised variable.
pub const ENV_PREFIX: &str = "SIGBLOCK_";

/// Overrides `logging.level`.
pub const ENV_LOG_LEVEL: &str = "SIGBLOCK_LOG_LEVEL";
/// Overrides `logging.format`.
pub const ENV_LOG_FORMAT: &str = "SIGBLOCK_LOG_FORMAT";
/// Overrides `limits.max_document_bytes`.
pub const ENV_MAX_DOCUMENT_BYTES: &str = "SIGBLOCK_MAX_DOCUMENT_BYTES";

/// Snapshot the `SIGBLOCK_*` variables of the current process.
#[must_use]
pub fn collect_env_vars() -> HashMap<String, String> {
    std::env::vars()
        .filter(|(key, _)| key.starts_with(ENV_PREFIX))
        .collect()
}

/// Apply recognised overrides from `vars` to the merged tree.
///
/// Returns how many overrides were applied.
///
/// # Errors
///
/// Returns [`ConfigError::ValidationError`] if a numeric variable does not
/// parse.
pub fn apply_env_overrides(
    merged: &mut toml::Value,
    vars: &HashMap<String, String>,
) -> ConfigResult<usize> {
    let mut applied: usize = 0;

    if let Some(level) = vars.get(ENV_LOG_LEVEL) {
        set_path(merged, "logging", "level", toml::Value::String(level.trim().to_owned()));
        applied = applied.saturating_add(1);
    }

    if let Some(format) = vars.get(ENV_LOG_FORMAT) {
        set_path(merged, "logging", "format", toml::Value::String(format.trim().to_owned()));
        applied = applied.saturating_add(1);
    }

    if let Some(raw) = vars.get(ENV_MAX_DOCUMENT_BYTES) {
        let bytes: i64 = raw.trim().parse().map_err(|_| ConfigError::ValidationError {
            field: ENV_MAX_DOCUMENT_BYTES.to_owned(),
            message: format!("'{raw}' is not a non-negative integer"),
        })?;
        if bytes < 0 {
            return Err(ConfigError::ValidationError {
                field: ENV_MAX_DOCUMENT_BYTES.to_owned(),
                message: format!("'{raw}' is not a non-negative integer"),
            });
        }
        set_path(merged, "limits", "max_document_bytes", toml::Value::Integer(bytes));
        applied = applied.saturating_add(1);
    }

    for key in vars.keys() {
        if !matches!(
            key.as_str(),
            ENV_LOG_LEVEL | ENV_LOG_FORMAT | ENV_MAX_DOCUMENT_BYTES
        ) {
            debug!(variable = %key, "ignoring unrecognised environment variable");
        }
    }

    Ok(applied)
}
