//! Configuration types.
//!
//! Every struct implements [`Default`] with the same values as
//! `defaults.toml`, so a bare `[section]` header produces a working
//! configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default maximum document size (16 MiB).
pub const DEFAULT_MAX_DOCUMENT_BYTES: u64 = 16_777_216;

/// Default base64 wrap width for embedded signatures.
pub const DEFAULT_WRAP_WIDTH: usize = 64;

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log output.
    pub logging: LoggingSection,
    /// Resource limits.
    pub limits: LimitsSection,
    /// Signature embedding.
    pub signing: SigningSection,
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Level filter: trace, debug, info, warn or error.
    pub level: String,
    /// Output format: pretty, compact, json or full.
    pub format: String,
    /// Extra filter directives such as `sigblock_codec=trace`.
    pub directives: Vec<String>,
    /// Write logs to rotating files in this directory instead of stderr.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
    /// File rotation: never, hourly or daily.
    pub rotation: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "warn".to_owned(),
            format: "compact".to_owned(),
            directives: Vec::new(),
            directory: None,
            rotation: "never".to_owned(),
        }
    }
}

/// `[limits]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsSection {
    /// Documents larger than this many bytes are rejected.
    pub max_document_bytes: u64,
}

impl Default for LimitsSection {
    fn default() -> Self {
        Self {
            max_document_bytes: DEFAULT_MAX_DOCUMENT_BYTES,
        }
    }
}

/// `[signing]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SigningSection {
    /// Base64 line width inside the signature block; 0 keeps one line.
    pub wrap_width: usize,
}

impl Default for SigningSection {
    fn default() -> Self {
        Self {
            wrap_width: DEFAULT_WRAP_WIDTH,
        }
    }
}
