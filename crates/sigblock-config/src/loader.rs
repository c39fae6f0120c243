//! Config file discovery and layered loading.
//!
//! Implements the `Config::load()` algorithm:
//! 1. Parse `defaults.toml` → base
//! 2. Merge `{config_dir}/sigblock/config.toml` (user), if present
//! 3. Merge the explicit `--config` file, which must exist
//! 4. Apply `SIGBLOCK_*` environment overrides
//! 5. Deserialize the merged tree → `Config`
//! 6. Validate

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::env::{apply_env_overrides, collect_env_vars};
use crate::error::{ConfigError, ConfigResult};
use crate::merge::deep_merge;
use crate::types::Config;
use crate::validate;

/// Embedded default configuration.
const DEFAULTS_TOML: &str = include_str!("defaults.toml");

/// Maximum allowed config file size (1 MiB).
const MAX_CONFIG_FILE_SIZE: u64 = 1_048_576;

/// A loaded configuration and where it came from.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// The final configuration.
    pub config: Config,
    /// Files merged on top of the defaults, lowest precedence first.
    pub loaded_files: Vec<PathBuf>,
    /// Number of environment overrides applied.
    pub env_overrides: usize,
}

/// Where to look for configuration layers.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Explicit config file (`--config`). Must exist when set.
    pub explicit: Option<PathBuf>,
    /// Directory holding the user `config.toml`. `None` uses the platform
    /// config directory joined with `sigblock`.
    pub user_dir: Option<PathBuf>,
    /// Skip the user config file entirely.
    pub skip_user: bool,
    /// Environment snapshot. `None` reads the process environment.
    pub env: Option<HashMap<String, String>>,
}

impl LoadOptions {
    /// Use an explicit config file.
    #[must_use]
    pub fn with_explicit(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit = Some(path.into());
        self
    }

    /// Look for the user config in `dir` instead of the platform location.
    #[must_use]
    pub fn with_user_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.user_dir = Some(dir.into());
        self
    }

    /// Do not load a user config file.
    #[must_use]
    pub fn without_user(mut self) -> Self {
        self.skip_user = true;
        self
    }

    /// Use a fixed set of environment variables.
    #[must_use]
    pub fn with_env(mut self, env: HashMap<String, String>) -> Self {
        self.env = Some(env);
        self
    }
}

/// Platform directory for the user config file (`~/.config/sigblock` on
/// Linux), if a home directory can be determined.
#[must_use]
pub fn user_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.config_dir().join("sigblock"))
}

/// Load the configuration with layered precedence.
///
/// # Errors
///
/// Returns a [`ConfigError`] if any config file is malformed or too large,
/// the explicit file is missing, an environment override is malformed, or
/// the merged configuration fails validation.
pub fn load(options: &LoadOptions) -> ConfigResult<ResolvedConfig> {
    let mut merged: toml::Value =
        toml::from_str(DEFAULTS_TOML).map_err(|e| ConfigError::ParseError {
            path: "<embedded defaults>".to_owned(),
            source: e,
        })?;
    let mut loaded_files = Vec::new();

    if !options.skip_user {
        let dir = options.user_dir.clone().or_else(user_config_dir);
        match dir {
            Some(dir) => {
                let path = dir.join("config.toml");
                if let Some(overlay) = try_load_file(&path)? {
                    deep_merge(&mut merged, &overlay);
                    info!(path = %path.display(), "loaded user config");
                    loaded_files.push(path);
                }
            },
            None => debug!("no home directory, skipping user config"),
        }
    }

    if let Some(path) = &options.explicit {
        let overlay = try_load_file(path)?.ok_or_else(|| ConfigError::ReadError {
            path: path.display().to_string(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        })?;
        deep_merge(&mut merged, &overlay);
        info!(path = %path.display(), "loaded config file");
        loaded_files.push(path.clone());
    }

    let env_vars = match &options.env {
        Some(vars) => vars.clone(),
        None => collect_env_vars(),
    };
    let env_overrides = apply_env_overrides(&mut merged, &env_vars)?;
    if env_overrides > 0 {
        debug!(count = env_overrides, "applied environment overrides");
    }

    let config: Config =
        merged
            .try_into()
            .map_err(|e: toml::de::Error| ConfigError::ParseError {
                path: "<merged config>".to_owned(),
                source: e,
            })?;

    validate::validate(&config)?;

    Ok(ResolvedConfig {
        config,
        loaded_files,
        env_overrides,
    })
}

/// Load a config from a specific file path (no layering).
///
/// # Errors
///
/// Returns a [`ConfigError`] if the file cannot be read, parsed, or fails
/// validation.
pub fn load_file(path: &Path) -> ConfigResult<Config> {
    let content = read_limited(path)?;
    let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
        path: path.display().to_string(),
        source: e,
    })?;

    validate::validate(&config)?;
    Ok(config)
}

fn read_limited(path: &Path) -> ConfigResult<String> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    // Checked after reading to avoid a stat/read race.
    if content.len() as u64 > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::ValidationError {
            field: path.display().to_string(),
            message: format!(
                "config file is {} bytes, exceeding the {MAX_CONFIG_FILE_SIZE} byte limit",
                content.len(),
            ),
        });
    }
    Ok(content)
}

/// Try to load a file as a TOML tree, returning `None` if it doesn't exist.
fn try_load_file(path: &Path) -> ConfigResult<Option<toml::Value>> {
    let content = match read_limited(path) {
        Ok(c) => c,
        Err(ConfigError::ReadError { source, .. })
            if source.kind() == std::io::ErrorKind::NotFound =>
        {
            debug!(path = %path.display(), "config file not found, skipping");
            return Ok(None);
        },
        Err(e) => return Err(e),
    };

    let value: toml::Value = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{ENV_LOG_LEVEL, ENV_MAX_DOCUMENT_BYTES};

    fn isolated() -> LoadOptions {
        LoadOptions::default().without_user().with_env(HashMap::new())
    }

    #[test]
    fn test_defaults_deserialize_to_config() {
        let config: Config = toml::from_str(DEFAULTS_TOML).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_defaults_only() {
        let resolved = load(&isolated()).unwrap();
        assert_eq!(resolved.config, Config::default());
        assert!(resolved.loaded_files.is_empty());
        assert_eq!(resolved.env_overrides, 0);
    }

    #[test]
    fn test_layer_precedence() {
        let dir = tempfile::tempdir().unwrap();
        let user_dir = dir.path().join("user");
        std::fs::create_dir_all(&user_dir).unwrap();
        std::fs::write(
            user_dir.join("config.toml"),
            "[logging]\nlevel = \"info\"\nformat = \"json\"\n[signing]\nwrap_width = 76\n",
        )
        .unwrap();
        let explicit = dir.path().join("explicit.toml");
        std::fs::write(&explicit, "[logging]\nlevel = \"debug\"\n").unwrap();

        let mut env = HashMap::new();
        env.insert(ENV_MAX_DOCUMENT_BYTES.to_owned(), "4096".to_owned());

        let options = LoadOptions::default()
            .with_user_dir(&user_dir)
            .with_explicit(&explicit)
            .with_env(env);
        let resolved = load(&options).unwrap();
        let config = resolved.config;

        // explicit beats user, user beats defaults, env beats all.
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.signing.wrap_width, 76);
        assert_eq!(config.limits.max_document_bytes, 4096);
        assert_eq!(resolved.loaded_files.len(), 2);
        assert_eq!(resolved.env_overrides, 1);
    }

    #[test]
    fn test_env_beats_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = dir.path().join("c.toml");
        std::fs::write(&explicit, "[logging]\nlevel = \"debug\"\n").unwrap();

        let mut env = HashMap::new();
        env.insert(ENV_LOG_LEVEL.to_owned(), "error".to_owned());
        let resolved = load(&isolated().with_explicit(&explicit).with_env(env)).unwrap();
        assert_eq!(resolved.config.logging.level, "error");
    }

    #[test]
    fn test_missing_user_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let options = LoadOptions::default()
            .with_user_dir(dir.path().join("nowhere"))
            .with_env(HashMap::new());
        assert!(load(&options).unwrap().loaded_files.is_empty());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = load(&isolated().with_explicit("/nonexistent/sigblock.toml"));
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }

    #[test]
    fn test_invalid_values_rejected_after_merge() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = dir.path().join("c.toml");
        std::fs::write(&explicit, "[logging]\nlevel = \"loud\"\n").unwrap();

        let result = load(&isolated().with_explicit(&explicit));
        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    }

    #[test]
    fn test_malformed_toml() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = dir.path().join("c.toml");
        std::fs::write(&explicit, "[logging\nlevel = ").unwrap();

        let result = load(&isolated().with_explicit(&explicit));
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_wrong_type_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = dir.path().join("c.toml");
        std::fs::write(&explicit, "[signing]\nwrap_width = \"wide\"\n").unwrap();

        let result = load(&isolated().with_explicit(&explicit));
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_load_file_nonexistent() {
        let result = load_file(Path::new("/nonexistent/config.toml"));
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }

    #[test]
    fn test_load_file_partial_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("c.toml");
        std::fs::write(&path, "[limits]\n").unwrap();

        let config = load_file(&path).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_oversized_config_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("huge.toml");
        let data = "x = \"".to_owned() + &"a".repeat(1_100_000) + "\"";
        std::fs::write(&file_path, data).unwrap();

        let result = try_load_file(&file_path);
        assert!(
            matches!(result, Err(ConfigError::ValidationError { .. })),
            "Expected ValidationError for oversized config, got: {result:?}"
        );
    }
}
