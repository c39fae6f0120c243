//! Reading documents from disk.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CodecError, CodecResult};

/// Default maximum document size (16 MiB).
pub const DEFAULT_MAX_DOCUMENT_BYTES: u64 = 16_777_216;

/// Resource limits applied while reading documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    /// Documents larger than this are rejected before they are read.
    pub max_document_bytes: u64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_document_bytes: DEFAULT_MAX_DOCUMENT_BYTES,
        }
    }
}

/// Confirm `path` names an existing regular file.
///
/// # Errors
///
/// Returns [`CodecError::FileNotFound`] otherwise.
pub fn require_file(path: &Path) -> CodecResult<()> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => Ok(()),
        _ => Err(CodecError::FileNotFound {
            path: path.to_path_buf(),
        }),
    }
}

/// Read a document as UTF-8 text, enforcing the size limit.
///
/// # Errors
///
/// - [`CodecError::FileNotFound`] if the path is not a regular file.
/// - [`CodecError::DocumentTooLarge`] if the file exceeds the limit.
/// - [`CodecError::InvalidEncoding`] if the bytes are not UTF-8.
/// - [`CodecError::Io`] on read failures.
pub fn read_document(path: &Path, limits: Limits) -> CodecResult<String> {
    let meta = std::fs::metadata(path).map_err(|_| CodecError::FileNotFound {
        path: path.to_path_buf(),
    })?;
    if !meta.is_file() {
        return Err(CodecError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    if meta.len() > limits.max_document_bytes {
        return Err(CodecError::DocumentTooLarge {
            size: meta.len(),
            limit: limits.max_document_bytes,
        });
    }

    let bytes = std::fs::read(path).map_err(|source| CodecError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), "read document");

    String::from_utf8(bytes).map_err(|_| CodecError::InvalidEncoding {
        path: path.to_path_buf(),
    })
}
