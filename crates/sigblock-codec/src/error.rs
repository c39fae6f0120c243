//! Codec error types.

use std::path::PathBuf;

use sigblock_crypto::CryptoError;
use thiserror::Error;

/// Errors raised while parsing, verifying or embedding a signed document.
///
/// Every variant is fatal for the pipeline that raised it: verification fails
/// closed at the first stage that detects a problem.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Wrong command-line usage.
    #[error("usage: {0}")]
    Usage(String),

    /// A required input file does not exist or is not a regular file.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// The path that was looked up.
        path: PathBuf,
    },

    /// The document has no start marker.
    #[error("no signature block found (missing '-----BEGIN SIGN-----' line)")]
    MissingSignature,

    /// The signature block holds no signature text.
    #[error("signature block is empty")]
    EmptySignature,

    /// The signature text is not valid base64.
    #[error("signature is not valid base64: {0}")]
    Base64Decode(String),

    /// The public key could not be loaded.
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    /// The private key could not be loaded.
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    /// The signature was checked and does not match.
    #[error("signature verification failed: {0}")]
    VerificationFailed(String),

    /// A second signature block follows a closed one.
    #[error("multiple signature blocks: second start marker at line {line}")]
    MultipleSignatureBlocks {
        /// 1-based line number of the second start marker.
        line: usize,
    },

    /// A marker line appears where the block structure does not allow one.
    #[error("unexpected '{marker}' at line {line}")]
    UnexpectedMarker {
        /// 1-based line number.
        line: usize,
        /// The marker text.
        marker: &'static str,
    },

    /// The document ends inside an open signature block.
    #[error("signature block opened at line {line} is never closed")]
    UnterminatedSignatureBlock {
        /// 1-based line number of the start marker.
        line: usize,
    },

    /// The document exceeds the configured size limit.
    #[error("document is {size} bytes, exceeding the {limit} byte limit")]
    DocumentTooLarge {
        /// Actual size in bytes.
        size: u64,
        /// Configured limit in bytes.
        limit: u64,
    },

    /// The document is not valid UTF-8 text.
    #[error("{} is not valid UTF-8 text", path.display())]
    InvalidEncoding {
        /// The offending file.
        path: PathBuf,
    },

    /// I/O error while reading or writing a file.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// The file involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl CodecError {
    /// Stable name of the error kind, used in reports.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Usage(_) => "UsageError",
            Self::FileNotFound { .. } => "FileNotFound",
            Self::MissingSignature => "MissingSignature",
            Self::EmptySignature => "EmptySignature",
            Self::Base64Decode(_) => "Base64DecodeError",
            Self::InvalidPublicKey(_) => "InvalidPublicKey",
            Self::InvalidPrivateKey(_) => "InvalidPrivateKey",
            Self::VerificationFailed(_) => "VerificationFailed",
            Self::MultipleSignatureBlocks { .. } => "MultipleSignatureBlocks",
            Self::UnexpectedMarker { .. } => "UnexpectedMarker",
            Self::UnterminatedSignatureBlock { .. } => "UnterminatedSignatureBlock",
            Self::DocumentTooLarge { .. } => "DocumentTooLarge",
            Self::InvalidEncoding { .. } => "InvalidEncoding",
            Self::Io { .. } => "IoError",
        }
    }

    /// Map a key-loading error from the crypto layer.
    pub(crate) fn from_public_key_error(err: CryptoError) -> Self {
        match err {
            CryptoError::InvalidPublicKey(msg) => Self::InvalidPublicKey(msg),
            other => Self::InvalidPublicKey(other.to_string()),
        }
    }

    /// Map a private-key loading error from the crypto layer.
    pub(crate) fn from_private_key_error(err: CryptoError) -> Self {
        match err {
            CryptoError::InvalidPrivateKey(msg) => Self::InvalidPrivateKey(msg),
            other => Self::InvalidPrivateKey(other.to_string()),
        }
    }
}

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Process status for a finished command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    /// Signature valid / command succeeded.
    Success,
    /// Any failure.
    Failure,
}

impl ExitOutcome {
    /// Numeric process status (0 or 1).
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Failure => 1,
        }
    }
}

impl<T> From<&CodecResult<T>> for ExitOutcome {
    fn from(result: &CodecResult<T>) -> Self {
        if result.is_ok() {
            Self::Success
        } else {
            Self::Failure
        }
    }
}
