//! Bridge from `sigblock_config::Config` to logging and codec settings.

use sigblock_codec::Limits;
use sigblock_config::{Config, LoggingSection};
use sigblock_telemetry::{FileRotation, LogConfig, LogFormat};

/// Settings the commands need from the resolved configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Settings {
    /// Document size limits.
    pub(crate) limits: Limits,
    /// Base64 wrap width for new signature blocks.
    pub(crate) wrap_width: usize,
}

/// Convert the `[logging]` section to a [`LogConfig`].
///
/// Values were validated by the config loader, so unknown strings fall back
/// to the defaults.
pub(crate) fn to_log_config(logging: &LoggingSection) -> LogConfig {
    let format = logging.format.parse().unwrap_or(LogFormat::Compact);

    let mut log_config = LogConfig::new(&logging.level).with_format(format);

    if let Some(dir) = &logging.directory {
        let rotation = match logging.rotation.as_str() {
            "daily" => FileRotation::Daily,
            "hourly" => FileRotation::Hourly,
            _ => FileRotation::Never,
        };
        log_config = log_config.with_file_logging(dir, "sigblock", rotation);
    }

    for directive in &logging.directives {
        log_config = log_config.with_directive(directive);
    }

    log_config
}

/// Extract command settings.
pub(crate) fn to_settings(cfg: &Config) -> Settings {
    Settings {
        limits: Limits {
            max_document_bytes: cfg.limits.max_document_bytes,
        },
        wrap_width: cfg.signing.wrap_width,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigblock_telemetry::LogTarget;

    #[test]
    fn test_default_logging() {
        let log_config = to_log_config(&LoggingSection::default());
        assert_eq!(log_config.level, "warn");
        assert_eq!(log_config.format, LogFormat::Compact);
        assert_eq!(log_config.target, LogTarget::Stderr);
    }

    #[test]
    fn test_logging_section_mapping() {
        let section = LoggingSection {
            level: "debug".to_owned(),
            format: "json".to_owned(),
            directives: vec!["sigblock_codec=trace".to_owned()],
            directory: Some("/var/log/sigblock".into()),
            rotation: "daily".to_owned(),
        };

        let log_config = to_log_config(&section);
        assert_eq!(log_config.level, "debug");
        assert_eq!(log_config.format, LogFormat::Json);
        assert_eq!(log_config.directives, vec!["sigblock_codec=trace"]);
        assert_eq!(
            log_config.target,
            LogTarget::File("/var/log/sigblock".into())
        );
        assert_eq!(log_config.file.rotation, FileRotation::Daily);
    }

    #[test]
    fn test_settings() {
        let mut cfg = Config::default();
        cfg.limits.max_document_bytes = 42;
        cfg.signing.wrap_width = 76;

        let settings = to_settings(&cfg);
        assert_eq!(settings.limits.max_document_bytes, 42);
        assert_eq!(settings.wrap_width, 76);
    }
}
